//! Pipeline for filtering movies and ranked lists.
//!
//! This crate provides:
//! - Filter trait and implementations (genre, year range, rating range, search)
//! - FilterPipeline for composing filters with AND semantics
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(GenreFilter::new("Drama"))
//!     .add_filter(YearRangeFilter::new(1990, 2010));
//!
//! // Plain movie lists
//! let movies = pipeline.apply(catalog.movies());
//!
//! // Ranked lists keep their order
//! let recs = pipeline.apply_recommendations(&catalog, recs);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use filters::{GenreFilter, RatingRangeFilter, SearchFilter, YearRangeFilter};
pub use traits::Filter;
