//! Types shared by every recommender.

use catalog::{Catalog, MovieId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A user's explicit ratings, movie id -> rating on the 1-10 scale.
///
/// Ordered so that anything accumulated over it happens in the same order
/// on every call.
pub type UserRatings = BTreeMap<MovieId, f32>;

/// Which ranking produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationSource {
    /// Similar to a seed movie
    Content,
    /// Matches the user's rating profile
    Profile,
    /// Highest catalog rating
    TopRated,
    /// Recent and well rated
    Trending,
    /// Content and profile blended
    Hybrid,
    /// Unranked catalog listing; the score is the catalog rating
    Catalog,
}

impl fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecommendationSource::Content => "content",
            RecommendationSource::Profile => "profile",
            RecommendationSource::TopRated => "top-rated",
            RecommendationSource::Trending => "trending",
            RecommendationSource::Hybrid => "hybrid",
            RecommendationSource::Catalog => "catalog",
        };
        f.write_str(name)
    }
}

/// A scored movie in a ranked list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub score: f32,
    pub source: RecommendationSource,
}

impl Recommendation {
    pub fn new(movie_id: MovieId, score: f32, source: RecommendationSource) -> Self {
        Self {
            movie_id,
            score,
            source,
        }
    }
}

/// Sort `(position, score)` pairs by descending score, keeping catalog order
/// on ties, and keep the first `n`. Uses IEEE total order, so NaN scores
/// still sort deterministically.
pub(crate) fn top_n_by_score(mut scored: Vec<(usize, f32)>, n: usize) -> Vec<(usize, f32)> {
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored.truncate(n);
    scored
}

/// Turn ranked catalog positions into recommendations
pub(crate) fn to_recommendations(
    catalog: &Catalog,
    ranked: Vec<(usize, f32)>,
    source: RecommendationSource,
) -> Vec<Recommendation> {
    ranked
        .into_iter()
        .filter_map(|(position, score)| {
            catalog
                .get_at(position)
                .map(|movie| Recommendation::new(movie.id, score, source))
        })
        .collect()
}
