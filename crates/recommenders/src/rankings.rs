//! Catalog-wide rankings that need no seed and no user: top rated and
//! trending.

use crate::types::{to_recommendations, top_n_by_score, Recommendation, RecommendationSource};
use catalog::Catalog;
use tracing::{debug, instrument};

/// Movies by catalog rating, highest first; catalog order on ties.
pub fn top_rated(catalog: &Catalog, n: usize) -> Vec<Recommendation> {
    let scored = catalog
        .movies()
        .iter()
        .enumerate()
        .map(|(position, movie)| (position, movie.rating))
        .collect();

    to_recommendations(catalog, top_n_by_score(scored, n), RecommendationSource::TopRated)
}

/// Recent, well-rated movies.
///
/// `score = rating × (year − base_year) / divisor` over movies released in
/// or after `min_year`. There is no time decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendingRanker {
    min_year: u16,
    base_year: u16,
    divisor: f32,
}

impl TrendingRanker {
    pub fn new() -> Self {
        Self {
            min_year: 2010,
            base_year: 2000,
            divisor: 25.0,
        }
    }

    /// Earliest release year considered (default: 2010)
    pub fn with_min_year(mut self, year: u16) -> Self {
        self.min_year = year;
        self
    }

    /// Year the recency boost counts from (default: 2000)
    pub fn with_base_year(mut self, year: u16) -> Self {
        self.base_year = year;
        self
    }

    /// Recency boost divisor (default: 25)
    pub fn with_divisor(mut self, divisor: f32) -> Self {
        self.divisor = divisor;
        self
    }

    pub fn score(&self, rating: f32, year: u16) -> f32 {
        let age = year as f32 - self.base_year as f32;
        rating * age / self.divisor
    }

    #[instrument(skip(self, catalog), fields(movies = catalog.len()))]
    pub fn rank(&self, catalog: &Catalog, n: usize) -> Vec<Recommendation> {
        let scored: Vec<(usize, f32)> = catalog
            .movies()
            .iter()
            .enumerate()
            .filter(|(_, movie)| movie.year >= self.min_year)
            .map(|(position, movie)| (position, self.score(movie.rating, movie.year)))
            .collect();
        debug!("{} movies released since {}", scored.len(), self.min_year);

        to_recommendations(catalog, top_n_by_score(scored, n), RecommendationSource::Trending)
    }
}

impl Default for TrendingRanker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{MovieId, MovieRow};

    fn create_test_catalog() -> Catalog {
        Catalog::load(vec![
            MovieRow::new(1, "Old Classic", 1972, 9.2),
            MovieRow::new(2, "Recent Hit", 2019, 8.0),
            MovieRow::new(3, "Borderline", 2010, 9.0),
            MovieRow::new(4, "Newer Flop", 2022, 4.0),
            MovieRow::new(5, "Also Nine", 2015, 9.2),
        ])
        .unwrap()
    }

    fn ids(recs: &[Recommendation]) -> Vec<MovieId> {
        recs.iter().map(|r| r.movie_id).collect()
    }

    #[test]
    fn test_top_rated_stable() {
        let recs = top_rated(&create_test_catalog(), 3);

        assert_eq!(ids(&recs), vec![1, 5, 3]);
        assert_eq!(recs[0].score, 9.2);
        assert_eq!(recs[0].source, RecommendationSource::TopRated);
    }

    #[test]
    fn test_top_rated_bounds() {
        let catalog = create_test_catalog();
        assert!(top_rated(&catalog, 0).is_empty());
        assert_eq!(top_rated(&catalog, 100).len(), 5);
        assert!(top_rated(&Catalog::new(), 5).is_empty());
    }

    #[test]
    fn test_trending_excludes_old_movies() {
        let recs = TrendingRanker::new().rank(&create_test_catalog(), 10);

        // 2019: 8.0*19/25=6.08, 2015: 9.2*15/25=5.52, 2022: 4.0*22/25=3.52, 2010: 9.0*10/25=3.6
        assert_eq!(ids(&recs), vec![2, 5, 3, 4]);
        assert!((recs[0].score - 6.08).abs() < 1e-5);
        assert!(recs.iter().all(|r| r.source == RecommendationSource::Trending));
    }

    #[test]
    fn test_trending_configurable() {
        let ranker = TrendingRanker::new().with_min_year(2016).with_divisor(10.0);
        let recs = ranker.rank(&create_test_catalog(), 10);

        // 2019: 8.0*19/10=15.2, 2022: 4.0*22/10=8.8
        assert_eq!(ids(&recs), vec![2, 4]);
        assert!((recs[1].score - 8.8).abs() < 1e-5);
    }
}
