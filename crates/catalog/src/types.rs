//! Core domain types for the movie catalog.
//!
//! `MovieRow` is what ingestion hands us; `Movie` is the validated record the
//! rest of the workspace reads. The catalog itself lives in `index.rs`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Movie-related Types
// =============================================================================

/// A raw dataset row, as read from `movies_data.csv`.
///
/// Required fields are plain values so serde rejects rows missing them.
/// Text attributes default to the empty string when the column is blank
/// or absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRow {
    pub movie_id: MovieId,
    pub title: String,
    pub year: u16,
    pub rating: f32,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub cast: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "poster")]
    pub poster_url: String,
}

impl MovieRow {
    /// Minimal row with only the required fields set
    pub fn new(movie_id: MovieId, title: impl Into<String>, year: u16, rating: f32) -> Self {
        Self {
            movie_id,
            title: title.into(),
            year,
            rating,
            genre: String::new(),
            keywords: String::new(),
            director: String::new(),
            cast: String::new(),
            description: String::new(),
            poster_url: String::new(),
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = director.into();
        self
    }

    pub fn with_cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = cast.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A validated movie in the catalog.
///
/// Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: u16,
    /// Average rating on a 0-10 scale
    pub rating: f32,
    /// Comma-separated genre list, e.g. "Action, Adventure"
    pub genre: String,
    pub keywords: String,
    pub director: String,
    pub cast: String,
    pub description: String,
    pub poster_url: String,
    /// Lower-cased `genre keywords director cast`, the input to vectorization
    pub feature_text: String,
}

impl Movie {
    /// Build a movie from a raw row, deriving its feature text
    pub fn from_row(row: MovieRow) -> Self {
        let feature_text = feature_text(&row.genre, &row.keywords, &row.director, &row.cast);
        Self {
            id: row.movie_id,
            title: row.title,
            year: row.year,
            rating: row.rating,
            genre: row.genre,
            keywords: row.keywords,
            director: row.director,
            cast: row.cast,
            description: row.description,
            poster_url: row.poster_url,
            feature_text,
        }
    }

    /// Genre tokens: the genre field split on commas, trimmed, blanks dropped
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        split_genres(&self.genre)
    }
}

/// Join the four content fields into the lower-cased text that gets vectorized.
pub fn feature_text(genre: &str, keywords: &str, director: &str, cast: &str) -> String {
    [genre, keywords, director, cast].join(" ").to_lowercase()
}

pub(crate) fn split_genres(genre: &str) -> impl Iterator<Item = &str> {
    genre.split(',').map(str::trim).filter(|g| !g.is_empty())
}

// =============================================================================
// Catalog - The In-Memory Movie Table
// =============================================================================

/// Ordered, immutable movie table.
///
/// Catalog order is ingestion order and is the tie-breaker for every stable
/// ranking downstream. Lookups by id go through `positions`.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    /// movie id -> index into `movies`
    pub(crate) positions: std::collections::HashMap<MovieId, usize>,
    /// genre token -> positions of movies carrying it (sorted by token)
    pub(crate) genre_index: BTreeMap<String, Vec<usize>>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a movie by ID
    ///
    /// `None` for unknown ids; callers must check for presence.
    pub fn get_by_id(&self, id: MovieId) -> Option<&Movie> {
        self.positions.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Catalog position of a movie
    pub fn position(&self, id: MovieId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Movie at a catalog position
    pub fn get_at(&self, position: usize) -> Option<&Movie> {
        self.movies.get(position)
    }

    /// All movies, in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Deduplicated, sorted genre tokens across the catalog
    pub fn get_all_genres(&self) -> Vec<String> {
        self.genre_index.keys().cloned().collect()
    }

    /// Number of movies per genre token, sorted by genre
    pub fn genre_counts(&self) -> Vec<(String, usize)> {
        self.genre_index
            .iter()
            .map(|(genre, positions)| (genre.clone(), positions.len()))
            .collect()
    }

    /// Smallest and largest release year, `None` for an empty catalog
    pub fn year_bounds(&self) -> Option<(u16, u16)> {
        let min = self.movies.iter().map(|m| m.year).min()?;
        let max = self.movies.iter().map(|m| m.year).max()?;
        Some((min, max))
    }
}
