//! Profile Recommender - "movies that match your ratings"
//!
//! ## Algorithm
//! 1. Weight each rated movie by how far its rating sits from the pivot:
//!    `weight = (rating - pivot) / scale`, so low ratings push away
//! 2. Taste vector = Σ weight × feature vector, divided by Σ|weight|
//! 3. Score every unrated movie by cosine against the taste vector
//! 4. Return the top `n`, catalog order on ties
//!
//! With no ratings, or nothing to weigh, the answer is the top-rated list.

use crate::rankings::top_rated;
use crate::types::{
    to_recommendations, top_n_by_score, Recommendation, RecommendationSource, UserRatings,
};
use catalog::Catalog;
use features::FeatureModel;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct ProfileRecommender {
    catalog: Arc<Catalog>,
    model: Arc<FeatureModel>,

    /// Rating that contributes nothing to the profile
    rating_pivot: f32,

    /// Distance from the pivot that counts as a full-strength weight
    rating_scale: f32,
}

impl ProfileRecommender {
    pub fn new(catalog: Arc<Catalog>, model: Arc<FeatureModel>) -> Self {
        Self {
            catalog,
            model,
            rating_pivot: 2.5,
            rating_scale: 2.5,
        }
    }

    /// Configure the neutral rating (default: 2.5)
    pub fn with_rating_pivot(mut self, pivot: f32) -> Self {
        self.rating_pivot = pivot;
        self
    }

    /// Configure the weight scale (default: 2.5)
    pub fn with_rating_scale(mut self, scale: f32) -> Self {
        self.rating_scale = scale;
        self
    }

    pub fn weight(&self, rating: f32) -> f32 {
        (rating - self.rating_pivot) / self.rating_scale
    }

    /// Weighted-average feature vector of the rated movies.
    ///
    /// `None` when no rated movie is in the catalog or every weight is zero.
    pub fn taste_vector(&self, ratings: &UserRatings) -> Option<Vec<f32>> {
        let mut taste = vec![0.0f32; self.model.vocabulary_size()];
        let mut total_weight = 0.0f32;

        for (&movie_id, &rating) in ratings {
            let Some(vector) = self
                .catalog
                .position(movie_id)
                .and_then(|position| self.model.vector(position))
            else {
                continue;
            };
            let weight = self.weight(rating);
            vector.add_scaled_to(&mut taste, weight);
            total_weight += weight.abs();
        }

        if total_weight == 0.0 {
            return None;
        }
        for value in &mut taste {
            *value /= total_weight;
        }
        Some(taste)
    }

    /// Up to `n` unrated movies ranked by similarity to the user's taste
    #[instrument(skip(self, ratings), fields(rated = ratings.len()))]
    pub fn recommend(&self, ratings: &UserRatings, n: usize) -> Vec<Recommendation> {
        if ratings.is_empty() {
            debug!("No ratings, falling back to top rated");
            return top_rated(&self.catalog, n);
        }
        let Some(taste) = self.taste_vector(ratings) else {
            debug!("Ratings carry no weight, falling back to top rated");
            return top_rated(&self.catalog, n);
        };

        let rated: HashSet<usize> = ratings
            .keys()
            .filter_map(|&id| self.catalog.position(id))
            .collect();

        let scored: Vec<(usize, f32)> = (0..self.catalog.len())
            .into_par_iter()
            .filter(|position| !rated.contains(position))
            .map(|position| (position, self.model.cosine_to_dense(position, &taste)))
            .collect();

        let recommendations = to_recommendations(
            &self.catalog,
            top_n_by_score(scored, n),
            RecommendationSource::Profile,
        );
        debug!("Generated {} profile recommendations", recommendations.len());
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_fixture_catalog, create_test_catalog, recommender_parts};
    use catalog::MovieId;

    fn ids(recs: &[Recommendation]) -> Vec<MovieId> {
        recs.iter().map(|r| r.movie_id).collect()
    }

    #[test]
    fn test_fixture_ranking() {
        let (catalog, model) = recommender_parts(create_fixture_catalog());
        let profile = ProfileRecommender::new(catalog, model);

        let ratings = UserRatings::from([(1, 9.0)]);
        let recs = profile.recommend(&ratings, 10);

        assert_eq!(ids(&recs), vec![2, 3]);
        assert!((recs[0].score - 1.0).abs() < 1e-6);
        assert_eq!(recs[1].score, 0.0);
        assert!(recs.iter().all(|r| r.source == RecommendationSource::Profile));
    }

    #[test]
    fn test_empty_ratings_fall_back_to_top_rated() {
        let (catalog, model) = recommender_parts(create_test_catalog());
        let profile = ProfileRecommender::new(catalog.clone(), model);

        let recs = profile.recommend(&UserRatings::new(), 3);
        assert_eq!(recs, top_rated(&catalog, 3));
    }

    #[test]
    fn test_zero_weight_falls_back_to_top_rated() {
        let (catalog, model) = recommender_parts(create_test_catalog());
        let profile = ProfileRecommender::new(catalog.clone(), model);

        // Unknown movie, and a rating exactly at the pivot
        let ratings = UserRatings::from([(1, 2.5), (999, 8.0)]);
        assert_eq!(profile.recommend(&ratings, 3), top_rated(&catalog, 3));
    }

    #[test]
    fn test_rated_movies_excluded() {
        let (catalog, model) = recommender_parts(create_test_catalog());
        let profile = ProfileRecommender::new(catalog, model);

        let ratings = UserRatings::from([(1, 10.0), (3, 7.0)]);
        let recs = profile.recommend(&ratings, 10);

        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|r| r.movie_id != 1 && r.movie_id != 3));
        assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_low_rating_pushes_away() {
        let (catalog, model) = recommender_parts(create_test_catalog());
        let profile = ProfileRecommender::new(catalog, model);

        // Disliking the crime movie ranks its neighbour last
        let ratings = UserRatings::from([(1, 1.0)]);
        let recs = profile.recommend(&ratings, 10);
        assert_eq!(recs.last().map(|r| r.movie_id), Some(2));
        assert!(recs.last().unwrap().score < 0.0);
    }

    #[test]
    fn test_weight_configurable() {
        let (catalog, model) = recommender_parts(create_test_catalog());
        let profile = ProfileRecommender::new(catalog, model)
            .with_rating_pivot(5.5)
            .with_rating_scale(4.5);

        assert_eq!(profile.weight(10.0), 1.0);
        assert_eq!(profile.weight(5.5), 0.0);
        assert_eq!(profile.weight(1.0), -1.0);
    }
}
