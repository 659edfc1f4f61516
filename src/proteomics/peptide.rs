// internal imports
use crate::proteomics::protein::Protein;

/// Terminus marker used when a peptide starts or ends at the protein
/// boundary instead of a neighboring residue
///
pub const TERMINUS_MARKER: u8 = b'-';

/// One indexed peptide. The sequence bytes live in the canonical
/// sequence arena of the index and the originating protein is referenced
/// by its position in the protein store, which keeps the record small
/// and free of self references.
///
#[derive(Debug, Clone)]
pub struct Peptide {
    /// Start of the sequence in the canonical arena
    pub(crate) sequence_start: usize,
    pub(crate) sequence_length: usize,
    /// Residue before the peptide, [TERMINUS_MARKER] at the protein start
    pub(crate) n_term: u8,
    /// Residue after the peptide, [TERMINUS_MARKER] at the protein end
    pub(crate) c_term: u8,
    /// Monoisotopic neutral mass
    pub(crate) mass: f64,
    /// Position of the originating protein in the store
    pub(crate) protein_index: usize,
    /// Start of the peptide within the protein sequence
    pub(crate) offset: usize,
}

impl Peptide {
    pub fn get_sequence_length(&self) -> usize {
        self.sequence_length
    }

    pub fn get_n_term(&self) -> u8 {
        self.n_term
    }

    pub fn get_c_term(&self) -> u8 {
        self.c_term
    }

    pub fn get_mass(&self) -> f64 {
        self.mass
    }

    pub fn get_protein_index(&self) -> usize {
        self.protein_index
    }

    pub fn get_offset(&self) -> usize {
        self.offset
    }
}

/// Read-only view of one indexed peptide with the sequence slice and the
/// protein record materialized. Valid for the lifetime of the database.
///
#[derive(Debug, Clone, Copy)]
pub struct PeptideView<'a> {
    pub(crate) peptide: &'a Peptide,
    pub(crate) sequence: &'a [u8],
    pub(crate) protein: Protein<'a>,
}

impl<'a> PeptideView<'a> {
    /// Returns the canonicalized sequence (isoleucine reported as leucine)
    ///
    pub fn get_sequence(&self) -> &'a [u8] {
        self.sequence
    }

    pub fn get_sequence_length(&self) -> usize {
        self.peptide.sequence_length
    }

    pub fn get_n_term(&self) -> u8 {
        self.peptide.n_term
    }

    pub fn get_c_term(&self) -> u8 {
        self.peptide.c_term
    }

    /// Returns the monoisotopic neutral mass
    ///
    pub fn get_mass(&self) -> f64 {
        self.peptide.mass
    }

    /// Returns the originating protein record
    ///
    pub fn get_protein(&self) -> &Protein<'a> {
        &self.protein
    }

    /// Returns the peptide start within the protein sequence
    ///
    pub fn get_offset(&self) -> usize {
        self.peptide.offset
    }

    /// Returns the residues as they appear in the protein record,
    /// without isoleucine/leucine folding
    ///
    pub fn get_original_sequence(&self) -> &'a [u8] {
        let offset = self.peptide.offset;
        &self.protein.get_sequence()[offset..offset + self.peptide.sequence_length]
    }
}
