//! The FilterPipeline chains filters with AND semantics.

use crate::traits::Filter;
use catalog::{Catalog, Movie};
use recommenders::Recommendation;

/// Chains multiple filters together; a movie must pass all of them.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GenreFilter::new("Drama"))
///     .add_filter(YearRangeFilter::new(1990, 2010))
///     .add_filter(RatingRangeFilter::new(7.0, 10.0));
///
/// let movies = pipeline.apply(catalog.movies());
/// ```
#[derive(Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Names of the filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Whether a single movie passes every filter
    pub fn matches(&self, movie: &Movie) -> bool {
        self.filters.iter().all(|filter| filter.matches(movie))
    }

    /// Apply all filters in sequence, preserving input order.
    pub fn apply<'a>(&self, movies: impl IntoIterator<Item = &'a Movie>) -> Vec<&'a Movie> {
        let mut current: Vec<&Movie> = movies.into_iter().collect();
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current.retain(|movie| filter.matches(movie));
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }

    /// Filter a ranked list, keeping its order.
    ///
    /// Recommendations whose movie is not in the catalog are dropped.
    pub fn apply_recommendations(
        &self,
        catalog: &Catalog,
        recommendations: Vec<Recommendation>,
    ) -> Vec<Recommendation> {
        let input = recommendations.len();
        let filtered: Vec<Recommendation> = recommendations
            .into_iter()
            .filter(|rec| {
                catalog
                    .get_by_id(rec.movie_id)
                    .is_some_and(|movie| self.matches(movie))
            })
            .collect();
        tracing::debug!(
            "Filtered recommendations with {} filters ({} -> {})",
            self.filters.len(),
            input,
            filtered.len()
        );
        filtered
    }
}
