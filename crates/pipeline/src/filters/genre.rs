//! Filter on the genre field.

use crate::traits::Filter;
use catalog::Movie;

/// Genre value that disables the filter
pub const ALL_GENRES: &str = "All";

/// Keeps movies whose genre field contains the requested genre,
/// case-insensitively.
///
/// Matching is substring containment on the whole field, so "Fi" matches
/// "Sci-Fi". Exactly `"All"` matches everything; any other casing is an
/// ordinary needle.
pub struct GenreFilter {
    /// Lower-cased needle; `None` for "All"
    needle: Option<String>,
}

impl GenreFilter {
    pub fn new(genre: &str) -> Self {
        let needle = (genre != ALL_GENRES).then(|| genre.to_lowercase());
        Self { needle }
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => movie.genre.to_lowercase().contains(needle.as_str()),
        }
    }
}
