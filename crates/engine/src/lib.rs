//! Engine crate for the ReelRecs recommendation engine.
//!
//! This crate contains the facade that owns the catalog, the feature model
//! and every recommender, plus the pieces a front end needs around it:
//! - **engine**: `RecommendationEngine`, the query surface
//! - **config**: `EngineConfig`, loaded from `REEL_RECS_*` variables
//! - **session**: the browse/search/detail view model
//! - **ratings**: the `RatingStore` persistence seam
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::{EngineConfig, NavigationEvent, RecommendationEngine, Session, Shelf};
//!
//! let engine = RecommendationEngine::from_csv(Path::new("data/movies_data.csv"), EngineConfig::from_env()?)?;
//!
//! let mut session = Session::new("ana");
//! session.rate(1, 9.0, &engine)?;
//! session.navigate(NavigationEvent::ShowShelf(Shelf::Recommended), &engine);
//! let page = session.current_page(&engine);
//! ```

pub mod error;
pub mod config;
pub mod ratings;
pub mod engine;
pub mod session;

pub use config::EngineConfig;
pub use engine::{MovieRecommendation, RecommendationEngine};
pub use error::{ConfigError, EngineError, RatingStoreError, Result, SessionError};
pub use ratings::{InMemoryRatingStore, RatingStore};
pub use session::{BrowseFilters, NavigationEvent, Page, Session, Shelf, View};

// The recommenders' vocabulary is part of this crate's API
pub use recommenders::{RecommendationSource, UserRatings};
