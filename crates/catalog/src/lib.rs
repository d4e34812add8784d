//! # Catalog Crate
//!
//! Loads the movie dataset and holds it as an immutable, ordered table.
//!
//! ## Main Components
//!
//! - **types**: `MovieRow` (raw dataset row), `Movie`, `Catalog`
//! - **parser**: read the headed CSV dataset into rows
//! - **index**: validate rows and build the catalog's lookup indices
//! - **error**: error types for ingestion
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/movies_data.csv"))?;
//!
//! if let Some(movie) = catalog.get_by_id(1) {
//!     println!("{} ({})", movie.title, movie.year);
//! }
//! println!("Genres: {:?}", catalog.get_all_genres());
//! ```
//!
//! The catalog is built once at startup and never mutated afterwards, so it
//! can be shared behind an `Arc` by any number of readers.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use index::{MAX_MOVIE_RATING, MIN_MOVIE_RATING};
pub use types::{feature_text, Catalog, Movie, MovieId, MovieRow};
