//! Filter on catalog rating.

use crate::traits::Filter;
use catalog::Movie;

/// Keeps movies whose rating lies between `min_rating` and `max_rating`,
/// inclusive.
pub struct RatingRangeFilter {
    min_rating: f32,
    max_rating: f32,
}

impl RatingRangeFilter {
    pub fn new(min_rating: f32, max_rating: f32) -> Self {
        Self {
            min_rating,
            max_rating,
        }
    }
}

impl Filter for RatingRangeFilter {
    fn name(&self) -> &str {
        "RatingRangeFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        movie.rating >= self.min_rating && movie.rating <= self.max_rating
    }
}
