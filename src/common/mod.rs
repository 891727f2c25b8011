pub mod constants;
pub mod errors;
pub mod file_operations;
pub mod logger;
mod types;

pub use types::*;
