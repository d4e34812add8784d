//! Catalog building and validation.
//!
//! Turns raw rows into the immutable `Catalog`:
//! - validate every row (unique id, rating in range)
//! - build the id -> position index
//! - build the genre index used for genre listings

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

/// Ratings in the dataset live on a 0-10 scale
pub const MIN_MOVIE_RATING: f32 = 0.0;
pub const MAX_MOVIE_RATING: f32 = 10.0;

impl Catalog {
    /// Build a catalog from raw rows, keeping row order as catalog order.
    ///
    /// Fails on the first duplicate id or out-of-range rating.
    pub fn load(rows: Vec<MovieRow>) -> Result<Self> {
        let mut catalog = Catalog::new();
        catalog.movies.reserve(rows.len());

        for row in rows {
            validate_row(&row)?;
            if catalog.positions.contains_key(&row.movie_id) {
                return Err(CatalogError::DuplicateMovieId { id: row.movie_id });
            }
            catalog.insert_movie(Movie::from_row(row));
        }

        catalog.build_genre_index();
        Ok(catalog)
    }

    /// Load the dataset CSV and build the catalog
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading movie catalog from {:?}", path);

        let rows = parser::parse_movies_csv(path)?;
        let catalog = Self::load(rows)?;

        info!(
            "Catalog built: {} movies, {} genres",
            catalog.len(),
            catalog.genre_index.len()
        );
        Ok(catalog)
    }

    fn insert_movie(&mut self, movie: Movie) {
        self.positions.insert(movie.id, self.movies.len());
        self.movies.push(movie);
    }

    /// Map each genre token to the positions of the movies carrying it
    fn build_genre_index(&mut self) {
        self.genre_index.clear();
        for (position, movie) in self.movies.iter().enumerate() {
            for genre in split_genres(&movie.genre) {
                let positions = self.genre_index.entry(genre.to_string()).or_default();
                // "Drama, Drama" should not list the movie twice
                if positions.last() != Some(&position) {
                    positions.push(position);
                }
            }
        }
    }
}

fn validate_row(row: &MovieRow) -> Result<()> {
    if !(MIN_MOVIE_RATING..=MAX_MOVIE_RATING).contains(&row.rating) {
        return Err(CatalogError::InvalidValue {
            field: "rating".to_string(),
            value: row.rating.to_string(),
        });
    }
    if row.title.trim().is_empty() {
        return Err(CatalogError::InvalidValue {
            field: "title".to_string(),
            value: format!("<empty> (movie {})", row.movie_id),
        });
    }
    Ok(())
}
