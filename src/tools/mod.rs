/// Some useful macros
#[macro_use]
pub mod macros;
