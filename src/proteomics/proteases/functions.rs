// internal imports
use crate::error::DatabaseError;
use crate::proteomics::proteases::protease::Protease;
use crate::proteomics::proteases::trypsin::{Trypsin, NAME as TRYPSIN_NAME};

/// Returns a protease by name
///
/// # Arguments
/// * `name` - Name of the protease
///
pub fn get_by_name(name: &str) -> Result<Box<dyn Protease>, DatabaseError> {
    match name.to_lowercase().as_str() {
        TRYPSIN_NAME => Ok(Box::new(Trypsin::new())),
        _ => Err(DatabaseError::UnsupportedProtease(name.to_string())),
    }
}
