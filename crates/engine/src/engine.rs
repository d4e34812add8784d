//! # Recommendation Engine
//!
//! The process-scoped facade over every recommender:
//! 1. Build the catalog once (or take a prebuilt one)
//! 2. Build the feature model once
//! 3. Wire the content, profile, hybrid and trending rankers to the shared
//!    catalog and model
//! 4. Answer queries, enriching ranked ids into displayable records
//!
//! Nothing is mutated after construction. The engine is `Clone` (all state
//! is behind `Arc`) and can be handed to any number of request handlers.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use catalog::{Catalog, Movie, MovieId};
use features::FeatureModel;
use pipeline::{FilterPipeline, GenreFilter, RatingRangeFilter, SearchFilter, YearRangeFilter};
use recommenders::{
    top_rated, ContentRecommender, HybridMerger, ProfileRecommender, Recommendation,
    RecommendationSource, TrendingRanker, UserRatings,
};

use crate::config::EngineConfig;
use crate::session::BrowseFilters;

/// A recommendation enriched with what a renderer needs to show it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub year: u16,
    pub genres: Vec<String>,
    pub rating: f32,
    pub director: String,
    pub poster_url: String,
    pub score: f32,
    pub source: RecommendationSource,
    pub explanation: String,
}

#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    model: Arc<FeatureModel>,
    content: ContentRecommender,
    profile: ProfileRecommender,
    hybrid: HybridMerger,
    trending: TrendingRanker,
    config: Arc<EngineConfig>,
}

impl RecommendationEngine {
    /// Validate `config`, build the feature model for `catalog` and wire up
    /// every recommender.
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self::build(catalog, config))
    }

    /// Load the dataset CSV and build the engine
    pub fn from_csv(path: &Path, config: EngineConfig) -> Result<Self> {
        config.validate().context("Invalid engine configuration")?;
        let catalog = Catalog::load_from_file(path)
            .with_context(|| format!("Failed to load movie catalog from {}", path.display()))?;
        Ok(Self::build(Arc::new(catalog), config))
    }

    fn build(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        let start_time = Instant::now();

        let model = Arc::new(FeatureModel::build(&catalog, &config.feature_config()));
        let content = ContentRecommender::new(catalog.clone(), model.clone());
        let profile = ProfileRecommender::new(catalog.clone(), model.clone())
            .with_rating_pivot(config.rating_pivot)
            .with_rating_scale(config.rating_scale);
        let hybrid = HybridMerger::new(catalog.clone(), content.clone(), profile.clone())
            .with_content_weight(config.content_weight)
            .with_profile_weight(config.profile_weight)
            .with_overfetch_factor(config.overfetch_factor);
        let trending = TrendingRanker::new()
            .with_min_year(config.trending_min_year)
            .with_base_year(config.trending_base_year)
            .with_divisor(config.trending_divisor);

        info!(
            "Recommendation engine ready: {} movies in {:.2?}",
            catalog.len(),
            start_time.elapsed()
        );

        Self {
            catalog,
            model,
            content,
            profile,
            hybrid,
            trending,
            config: Arc::new(config),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model(&self) -> &FeatureModel {
        &self.model
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn get_movie(&self, movie_id: MovieId) -> Option<&Movie> {
        self.catalog.get_by_id(movie_id)
    }

    pub fn all_genres(&self) -> Vec<String> {
        self.catalog.get_all_genres()
    }

    /// Movies most similar to `movie_id`; empty for unknown ids
    pub fn similar_to(&self, movie_id: MovieId, n: usize) -> Vec<MovieRecommendation> {
        let recs = self.content.recommend_similar(movie_id, n);
        self.enrich(recs, Some(movie_id))
    }

    /// Movies matching a user's ratings; top rated when the ratings say nothing
    pub fn recommend_for_profile(&self, ratings: &UserRatings, n: usize) -> Vec<MovieRecommendation> {
        let recs = self.profile.recommend(ratings, n);
        self.enrich(recs, None)
    }

    /// Blend of `similar_to(movie_id)` and `recommend_for_profile(ratings)`
    pub fn hybrid(&self, movie_id: MovieId, ratings: &UserRatings, n: usize) -> Vec<MovieRecommendation> {
        let recs = self.hybrid.recommend(movie_id, ratings, n);
        self.enrich(recs, Some(movie_id))
    }

    pub fn top_rated(&self, n: usize) -> Vec<MovieRecommendation> {
        self.enrich(top_rated(&self.catalog, n), None)
    }

    pub fn trending(&self, n: usize) -> Vec<MovieRecommendation> {
        self.enrich(self.trending.rank(&self.catalog, n), None)
    }

    /// Case-insensitive substring search over title, genre, director, cast
    /// and keywords, in catalog order
    pub fn search(&self, query: &str) -> Vec<MovieRecommendation> {
        self.list(&FilterPipeline::new().add_filter(SearchFilter::new(query)))
    }

    /// Movies whose genre field contains `genre`; `"All"` lists everything
    pub fn filter_by_genre(&self, genre: &str) -> Vec<MovieRecommendation> {
        self.list(&FilterPipeline::new().add_filter(GenreFilter::new(genre)))
    }

    pub fn filter_by_year_range(&self, min_year: u16, max_year: u16) -> Vec<MovieRecommendation> {
        self.list(&FilterPipeline::new().add_filter(YearRangeFilter::new(min_year, max_year)))
    }

    pub fn filter_by_rating_range(&self, min_rating: f32, max_rating: f32) -> Vec<MovieRecommendation> {
        self.list(&FilterPipeline::new().add_filter(RatingRangeFilter::new(min_rating, max_rating)))
    }

    /// The catalog narrowed by every set browse filter, in catalog order
    pub fn browse(&self, filters: &BrowseFilters) -> Vec<MovieRecommendation> {
        self.list(&filters.pipeline())
    }

    /// The `n` highest rated movies that pass the browse filters
    pub fn top_rated_where(&self, filters: &BrowseFilters, n: usize) -> Vec<MovieRecommendation> {
        let mut recs = filters
            .pipeline()
            .apply_recommendations(&self.catalog, top_rated(&self.catalog, self.catalog.len()));
        recs.truncate(n);
        self.enrich(recs, None)
    }

    /// Drop the ranked movies that fail the browse filters, keeping order
    pub fn apply_filters(
        &self,
        filters: &BrowseFilters,
        recommendations: Vec<MovieRecommendation>,
    ) -> Vec<MovieRecommendation> {
        let pipeline = filters.pipeline();
        if pipeline.is_empty() {
            return recommendations;
        }
        recommendations
            .into_iter()
            .filter(|rec| {
                self.catalog
                    .get_by_id(rec.movie_id)
                    .is_some_and(|movie| pipeline.matches(movie))
            })
            .collect()
    }

    fn list(&self, pipeline: &FilterPipeline) -> Vec<MovieRecommendation> {
        let recs: Vec<Recommendation> = pipeline
            .apply(self.catalog.movies())
            .into_iter()
            .map(|movie| Recommendation::new(movie.id, movie.rating, RecommendationSource::Catalog))
            .collect();
        debug!("Listing {} movies", recs.len());
        self.enrich(recs, None)
    }

    /// Attach movie metadata and an explanation to ranked ids
    fn enrich(&self, recs: Vec<Recommendation>, seed: Option<MovieId>) -> Vec<MovieRecommendation> {
        let seed_title = seed
            .and_then(|id| self.catalog.get_by_id(id))
            .map(|movie| movie.title.as_str());

        recs.into_iter()
            .filter_map(|rec| {
                let movie = self.catalog.get_by_id(rec.movie_id)?;
                Some(MovieRecommendation {
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    year: movie.year,
                    genres: movie.genres().map(String::from).collect(),
                    rating: movie.rating,
                    director: movie.director.clone(),
                    poster_url: movie.poster_url.clone(),
                    score: rec.score,
                    source: rec.source,
                    explanation: explain(&rec, movie, seed_title),
                })
            })
            .collect()
    }
}

fn explain(rec: &Recommendation, movie: &Movie, seed_title: Option<&str>) -> String {
    match (rec.source, seed_title) {
        (RecommendationSource::Content, Some(seed)) => {
            format!("Because you viewed {} (similarity {:.2})", seed, rec.score)
        }
        (RecommendationSource::Hybrid, Some(seed)) => {
            format!("Like {} and matches your ratings (score {:.2})", seed, rec.score)
        }
        (RecommendationSource::Profile, _) => {
            format!("Matches your ratings (affinity {:.2})", rec.score)
        }
        (RecommendationSource::TopRated, _) => {
            format!("Highly rated: {:.1}/10", movie.rating)
        }
        (RecommendationSource::Trending, _) => {
            format!("Trending: {} release rated {:.1}", movie.year, movie.rating)
        }
        _ => format!("Rated {:.1}/10", movie.rating),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::MovieRow;

    fn create_test_engine() -> RecommendationEngine {
        let catalog = Catalog::load(vec![
            MovieRow::new(1, "A", 2015, 9.0).with_genre("Action"),
            MovieRow::new(2, "B", 2005, 5.0).with_genre("Action"),
            MovieRow::new(3, "C", 2019, 8.0).with_genre("Drama"),
        ])
        .unwrap();
        RecommendationEngine::new(Arc::new(catalog), EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_enrichment() {
        let engine = create_test_engine();
        let recs = engine.similar_to(1, 1);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].movie_id, 2);
        assert_eq!(recs[0].title, "B");
        assert_eq!(recs[0].genres, vec!["Action"]);
        assert_eq!(recs[0].source, RecommendationSource::Content);
        assert!(recs[0].explanation.starts_with("Because you viewed A"));
    }

    #[test]
    fn test_listings_score_is_rating() {
        let engine = create_test_engine();
        let recs = engine.filter_by_genre("action");

        assert_eq!(recs.iter().map(|r| r.movie_id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(recs.iter().all(|r| r.score == r.rating));
        assert!(recs.iter().all(|r| r.source == RecommendationSource::Catalog));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let catalog = Arc::new(Catalog::load(vec![MovieRow::new(1, "A", 2015, 9.0)]).unwrap());

        let zero_scale = EngineConfig {
            rating_scale: 0.0,
            ..EngineConfig::default()
        };
        assert!(RecommendationEngine::new(catalog.clone(), zero_scale).is_err());

        let zero_divisor = EngineConfig {
            trending_divisor: 0.0,
            ..EngineConfig::default()
        };
        assert!(RecommendationEngine::new(catalog, zero_divisor).is_err());
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecommendationEngine>();

        let engine = create_test_engine();
        let clone = engine.clone();
        assert!(std::ptr::eq(engine.catalog(), clone.catalog()));
    }
}
