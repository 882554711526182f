/// Core Module for FifaStat
///
/// Database access and the shared error type.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{FifaStatError, Result};
