//! Core trait for the filtering pipeline.

use catalog::Movie;

/// A pure predicate over movies.
///
/// Filters never mutate the catalog; the pipeline decides what to do with
/// the movies that pass. `Send + Sync` so one pipeline can be shared across
/// request handlers.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `movie` passes this filter
    fn matches(&self, movie: &Movie) -> bool;
}
