//! # Recommenders Crate
//!
//! Ranked movie lists built on top of the catalog and its feature model.
//!
//! ## Components
//!
//! ### Content Recommender
//! "More like this": reads the seed's row of the similarity matrix.
//!
//! ### Profile Recommender
//! "Matches your ratings": folds the user's ratings into a taste vector and
//! scores every unrated movie against it. Falls back to top rated when the
//! ratings say nothing.
//!
//! ### Hybrid Merger
//! Blends both lists with configurable weights (50/50 by default).
//!
//! ### Rankings
//! Top rated and trending, no user required.
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommenders::{ContentRecommender, HybridMerger, ProfileRecommender, UserRatings};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load_from_file(path)?);
//! let model = Arc::new(FeatureModel::build(&catalog, &FeatureConfig::default()));
//!
//! let content = ContentRecommender::new(catalog.clone(), model.clone());
//! let profile = ProfileRecommender::new(catalog.clone(), model.clone());
//! let hybrid = HybridMerger::new(catalog.clone(), content.clone(), profile.clone());
//!
//! let ratings = UserRatings::from([(1, 9.0), (7, 3.0)]);
//! let recs = hybrid.recommend(42, &ratings, 10);
//! ```
//!
//! All recommenders share the catalog and model through `Arc` and never
//! mutate them, so they are cheap to clone and safe to call from any thread.

// Public modules
pub mod types;
pub mod content;
pub mod profile;
pub mod hybrid;
pub mod rankings;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use content::ContentRecommender;
pub use hybrid::HybridMerger;
pub use profile::ProfileRecommender;
pub use rankings::{top_rated, TrendingRanker};
pub use types::{Recommendation, RecommendationSource, UserRatings};
