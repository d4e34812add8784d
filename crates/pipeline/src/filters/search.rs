//! Free-text search filter.

use crate::traits::Filter;
use catalog::Movie;

/// Keeps movies where the query appears, case-insensitively, in the title,
/// genre, director, cast or keywords. Any one field is enough.
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_lowercase(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl Filter for SearchFilter {
    fn name(&self) -> &str {
        "SearchFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        [
            &movie.title,
            &movie.genre,
            &movie.director,
            &movie.cast,
            &movie.keywords,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.query))
    }
}
