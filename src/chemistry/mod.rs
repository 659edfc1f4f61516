/// Amino acid residue masses and residue canonicalization
pub mod amino_acid;
