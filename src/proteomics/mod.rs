/// I/O for various proteomics data formats
/// Note: Most operation on file content is working with byte representation not strings as this get rid of any encoding/decoding issues and overhead(?).
pub mod io;

/// Peptide database construction and mass range queries
pub mod database;
/// In-silico digestion of proteins into peptide candidates
pub mod digest;
/// Mass sorted peptide index
pub mod index;
/// Peptide definition
pub mod peptide;
/// Protein definition and the protein store
pub mod protein;
/// Proteases for the in-silico digestion
pub mod proteases;
