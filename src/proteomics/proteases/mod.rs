/// Functions for dealing with proteases, like getting them by name
pub mod functions;
/// Defines protease trait which should be implemented by all proteases
pub mod protease;
/// Defines trypsin protease
pub mod trypsin;
