//! Error types for the catalog crate.
//!
//! Only ingestion can fail. Lookups against a built catalog never error:
//! an unknown id is an absent value, not a failure.

use thiserror::Error;

/// Errors that can occur while reading or validating the movie dataset
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Row in the dataset couldn't be parsed
    ///
    /// `line` is the 1-based line in the source file (the header is line 1)
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A field had a value outside its allowed domain
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two rows share the same movie id
    #[error("Duplicate movie id {id}")]
    DuplicateMovieId { id: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
