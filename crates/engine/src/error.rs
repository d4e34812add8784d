//! Error types for the engine crate.
//!
//! Queries never fail: unknown ids and empty inputs give empty or fallback
//! lists. Errors come from configuration, the rating store and misuse of a
//! session.

use catalog::MovieId;
use thiserror::Error;

/// Invalid engine configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Failures of a `RatingStore` backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatingStoreError {
    /// A writer panicked while holding the store's lock
    #[error("Rating store lock poisoned")]
    LockPoisoned,
}

/// Invalid actions on a browsing session
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Rating {rating} is outside 1-10")]
    RatingOutOfRange { rating: f32 },

    #[error("Movie {movie_id} is not in the catalog")]
    UnknownMovie { movie_id: MovieId },
}

/// Any engine error
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    RatingStore(#[from] RatingStoreError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
