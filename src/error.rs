// std imports
use std::path::PathBuf;

// 3rd party imports
use thiserror::Error;

/// Errors surfaced while building a peptide database.
/// Construction either completes or fails with one of these;
/// every operation on a built database is total.
///
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// FASTA file could not be opened or read
    #[error("unable to read fasta database `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid numeric parameters, e.g. non-positive or inverted mass bounds
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Requested protease is not known
    #[error("protease `{0}` is not supported")]
    UnsupportedProtease(String),
}
