//! Content Recommender - "more like this"
//!
//! Reads one row of the cached similarity matrix and ranks every other movie
//! by its similarity to the seed.

use crate::types::{to_recommendations, top_n_by_score, Recommendation, RecommendationSource};
use catalog::{Catalog, MovieId};
use features::FeatureModel;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct ContentRecommender {
    catalog: Arc<Catalog>,
    model: Arc<FeatureModel>,
}

impl ContentRecommender {
    pub fn new(catalog: Arc<Catalog>, model: Arc<FeatureModel>) -> Self {
        Self { catalog, model }
    }

    /// Up to `n` movies most similar to `movie_id`, the seed excluded.
    ///
    /// Unknown seeds yield an empty list.
    #[instrument(skip(self))]
    pub fn recommend_similar(&self, movie_id: MovieId, n: usize) -> Vec<Recommendation> {
        if n == 0 {
            return Vec::new();
        }
        let Some(seed) = self.catalog.position(movie_id) else {
            debug!("Unknown seed movie {}", movie_id);
            return Vec::new();
        };
        let Some(row) = self.model.similarity_row(seed) else {
            return Vec::new();
        };

        let scored: Vec<(usize, f32)> = row
            .iter()
            .enumerate()
            .filter(|&(position, _)| position != seed)
            .map(|(position, &score)| (position, score))
            .collect();

        let recommendations = to_recommendations(
            &self.catalog,
            top_n_by_score(scored, n),
            RecommendationSource::Content,
        );
        debug!("Found {} similar movies", recommendations.len());
        recommendations
    }
}
