/// FifaStat Error Module
///
/// This module defines the error taxonomy for the database accessor.
/// Engine diagnostics are carried through unchanged so callers see the
/// original SQLite message.
use std::path::PathBuf;
use thiserror::Error;

/// Error type for every accessor operation.
///
/// The variants map onto the failure points of an accessor's life:
/// - the database file is missing (`NotFound`)
/// - the engine refuses to open it (`OpenFailed`)
/// - a statement fails (`Query`)
/// - the accessor was already closed (`Closed`)
#[derive(Error, Debug)]
pub enum FifaStatError {
    /// The database path does not resolve to an existing file
    #[error("Database file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but SQLite could not open or read it
    #[error("Failed to open database {}: {source}", path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Any statement failure (syntax, missing object, binding mismatch)
    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// An operation was attempted after `close()`
    #[error("Database connection is closed")]
    Closed,

    /// Unsupported export or display format
    #[error("Format error: {0}")]
    Format(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result to use FifaStatError as the error type.
pub type Result<T> = std::result::Result<T, FifaStatError>;
