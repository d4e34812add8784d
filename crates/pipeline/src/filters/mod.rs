//! Filter implementations for the pipeline.
//!
//! Each filter is a pure predicate over a single movie.

pub mod genre;
pub mod year_range;
pub mod rating_range;
pub mod search;

// Re-export for convenience
pub use genre::GenreFilter;
pub use rating_range::RatingRangeFilter;
pub use search::SearchFilter;
pub use year_range::YearRangeFilter;
