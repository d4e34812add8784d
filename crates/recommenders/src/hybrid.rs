//! Hybrid Merger - blends "more like this" with "matches your ratings"
//!
//! ## Algorithm
//! 1. Over-fetch `factor × n` candidates from each side
//! 2. If one side came back empty, the other side's top `n` is the answer
//! 3. `blend = content_weight × content + profile_weight × profile`,
//!    a movie missing from one side scores 0 there; a top-rated fallback
//!    candidate scores 1 on the profile side
//! 4. Top `n` by blend, catalog order on ties

use crate::content::ContentRecommender;
use crate::profile::ProfileRecommender;
use crate::types::{
    to_recommendations, top_n_by_score, Recommendation, RecommendationSource, UserRatings,
};
use catalog::{Catalog, MovieId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct HybridMerger {
    catalog: Arc<Catalog>,
    content: ContentRecommender,
    profile: ProfileRecommender,
    content_weight: f32,
    profile_weight: f32,
    overfetch_factor: usize,
}

impl HybridMerger {
    pub fn new(catalog: Arc<Catalog>, content: ContentRecommender, profile: ProfileRecommender) -> Self {
        Self {
            catalog,
            content,
            profile,
            content_weight: 0.5,
            profile_weight: 0.5,
            overfetch_factor: 2,
        }
    }

    /// Configure the content-side weight (default: 0.5)
    pub fn with_content_weight(mut self, weight: f32) -> Self {
        self.content_weight = weight;
        self
    }

    /// Configure the profile-side weight (default: 0.5)
    pub fn with_profile_weight(mut self, weight: f32) -> Self {
        self.profile_weight = weight;
        self
    }

    /// Configure how many candidates per requested result each side fetches (default: 2)
    pub fn with_overfetch_factor(mut self, factor: usize) -> Self {
        self.overfetch_factor = factor.max(1);
        self
    }

    #[instrument(skip(self, ratings), fields(rated = ratings.len()))]
    pub fn recommend(&self, movie_id: MovieId, ratings: &UserRatings, n: usize) -> Vec<Recommendation> {
        if n == 0 {
            return Vec::new();
        }
        let fetch = n.saturating_mul(self.overfetch_factor);
        let mut content = self.content.recommend_similar(movie_id, fetch);
        let mut profile = self.profile.recommend(ratings, fetch);
        debug!(
            "Hybrid candidates: {} content, {} profile",
            content.len(),
            profile.len()
        );

        if content.is_empty() {
            profile.truncate(n);
            return profile;
        }
        if profile.is_empty() {
            content.truncate(n);
            return content;
        }

        // (content, profile) per movie
        let mut scores: HashMap<MovieId, (f32, f32)> = HashMap::new();
        for rec in &content {
            scores.entry(rec.movie_id).or_default().0 = rec.score;
        }
        for rec in &profile {
            scores.entry(rec.movie_id).or_default().1 = profile_score(rec);
        }

        let blended: Vec<(usize, f32)> = scores
            .into_iter()
            .filter_map(|(id, (c, p))| {
                let position = self.catalog.position(id)?;
                Some((position, self.content_weight * c + self.profile_weight * p))
            })
            .collect();

        to_recommendations(&self.catalog, top_n_by_score(blended, n), RecommendationSource::Hybrid)
    }
}

/// Top-rated fallback candidates carry no affinity, so each counts as a full
/// match and only content similarity orders them.
fn profile_score(rec: &Recommendation) -> f32 {
    match rec.source {
        RecommendationSource::TopRated => 1.0,
        _ => rec.score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_fixture_catalog, create_test_catalog, recommender_parts};
    use features::FeatureModel;

    fn create_merger(catalog: Catalog) -> (HybridMerger, ContentRecommender, ProfileRecommender) {
        let (catalog, model): (Arc<Catalog>, Arc<FeatureModel>) = recommender_parts(catalog);
        let content = ContentRecommender::new(catalog.clone(), model.clone());
        let profile = ProfileRecommender::new(catalog.clone(), model);
        (
            HybridMerger::new(catalog, content.clone(), profile.clone()),
            content,
            profile,
        )
    }

    #[test]
    fn test_blend_is_weighted_sum() {
        let (merger, content, profile) = create_merger(create_test_catalog());
        let ratings = UserRatings::from([(3, 9.0)]);

        let c: HashMap<MovieId, f32> = content
            .recommend_similar(1, 20)
            .into_iter()
            .map(|r| (r.movie_id, r.score))
            .collect();
        let p: HashMap<MovieId, f32> = profile
            .recommend(&ratings, 20)
            .into_iter()
            .map(|r| (r.movie_id, r.score))
            .collect();

        let recs = merger.recommend(1, &ratings, 10);
        assert!(!recs.is_empty());
        for rec in &recs {
            let expected = 0.5 * c.get(&rec.movie_id).copied().unwrap_or(0.0)
                + 0.5 * p.get(&rec.movie_id).copied().unwrap_or(0.0);
            assert!((rec.score - expected).abs() < 1e-6);
            assert_eq!(rec.source, RecommendationSource::Hybrid);
        }
        assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_fixture_blend() {
        let (merger, _, _) = create_merger(create_fixture_catalog());

        // Content from 3: [1 (0.0), 2 (0.0)]; profile from {1: 9}: [2 (1.0), 3 (0.0)]
        let recs = merger.recommend(3, &UserRatings::from([(1, 9.0)]), 3);
        let ids: Vec<MovieId> = recs.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert!((recs[0].score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_seed_returns_profile() {
        let (merger, _, profile) = create_merger(create_test_catalog());
        let ratings = UserRatings::from([(1, 8.0)]);

        assert_eq!(merger.recommend(999, &ratings, 2), profile.recommend(&ratings, 2));
    }

    #[test]
    fn test_fallback_counts_as_full_profile_match() {
        let (merger, content, _) = create_merger(create_test_catalog());
        let c: HashMap<MovieId, f32> = content
            .recommend_similar(1, 20)
            .into_iter()
            .map(|r| (r.movie_id, r.score))
            .collect();

        let recs = merger.recommend(1, &UserRatings::new(), 4);
        assert_eq!(recs.len(), 4);
        for rec in &recs {
            let expected = 0.5 * c.get(&rec.movie_id).copied().unwrap_or(0.0) + 0.5;
            assert!((rec.score - expected).abs() < 1e-6);
        }
        // Catalog rating no longer reorders the blend: content similarity does
        let ids: Vec<MovieId> = recs.iter().map(|r| r.movie_id).collect();
        assert_eq!(&ids[..2], &[2, 3]);
    }

    #[test]
    fn test_weights_configurable() {
        let (merger, content, _) = create_merger(create_test_catalog());
        let merger = merger.with_content_weight(1.0).with_profile_weight(0.0);

        let recs = merger.recommend(1, &UserRatings::from([(4, 9.0)]), 2);
        let expected = content.recommend_similar(1, 2);
        assert_eq!(recs[0].movie_id, expected[0].movie_id);
        assert!((recs[0].score - expected[0].score).abs() < 1e-6);
    }
}
