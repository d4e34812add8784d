//! Browsing session view model.
//!
//! A session is a small state machine: the user is always on exactly one
//! `View`, and only `NavigationEvent`s move them. `current_page` turns the
//! view plus the session's ratings and filters into the `Page` a renderer
//! would draw.

use catalog::{Movie, MovieId, MAX_MOVIE_RATING};
use pipeline::{FilterPipeline, GenreFilter, RatingRangeFilter, YearRangeFilter};
use recommenders::UserRatings;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::{MovieRecommendation, RecommendationEngine};
use crate::error::{Result, SessionError};
use crate::ratings::RatingStore;

/// Results on every shelf
pub const SHELF_SIZE: usize = 20;

/// "More like this" results on a detail page
pub const MORE_LIKE_THIS: usize = 10;

/// Lowest rating a user can give
pub const MIN_USER_RATING: f32 = 1.0;

/// Browse-mode sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shelf {
    All,
    Recommended,
    TopRated,
    Trending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum View {
    Browse(Shelf),
    Search { query: String },
    Detail { movie_id: MovieId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
    ShowShelf(Shelf),
    Search(String),
    SelectMovie(MovieId),
    Back,
}

/// Sidebar filters, applied (AND) to every list a session shows.
///
/// `None` leaves that dimension unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowseFilters {
    pub genre: Option<String>,
    /// Inclusive release-year range
    pub years: Option<(u16, u16)>,
    /// Inclusive catalog-rating range
    pub ratings: Option<(f32, f32)>,
}

impl BrowseFilters {
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_years(mut self, min_year: u16, max_year: u16) -> Self {
        self.years = Some((min_year, max_year));
        self
    }

    pub fn with_ratings(mut self, min_rating: f32, max_rating: f32) -> Self {
        self.ratings = Some((min_rating, max_rating));
        self
    }

    pub fn pipeline(&self) -> FilterPipeline {
        let mut pipeline = FilterPipeline::new();
        if let Some(genre) = &self.genre {
            pipeline = pipeline.add_filter(GenreFilter::new(genre));
        }
        if let Some((min, max)) = self.years {
            pipeline = pipeline.add_filter(YearRangeFilter::new(min, max));
        }
        if let Some((min, max)) = self.ratings {
            pipeline = pipeline.add_filter(RatingRangeFilter::new(min, max));
        }
        pipeline
    }
}

/// What a renderer draws for the current view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Page {
    Shelf {
        shelf: Shelf,
        movies: Vec<MovieRecommendation>,
        /// Hint to show above the list, if any
        notice: Option<String>,
    },
    SearchResults {
        query: String,
        movies: Vec<MovieRecommendation>,
    },
    Detail {
        movie: Movie,
        user_rating: Option<f32>,
        more_like_this: Vec<MovieRecommendation>,
    },
}

#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    view: View,
    /// Where `Back` goes from a detail view
    return_to: View,
    ratings: UserRatings,
    filters: BrowseFilters,
}

impl Session {
    /// A fresh session on the "all movies" shelf with no ratings
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            view: View::Browse(Shelf::All),
            return_to: View::Browse(Shelf::All),
            ratings: UserRatings::new(),
            filters: BrowseFilters::default(),
        }
    }

    /// A fresh session seeded with the user's stored ratings
    pub fn restore(username: impl Into<String>, store: &dyn RatingStore) -> Result<Self> {
        let mut session = Self::new(username);
        session.ratings = store.load(&session.username)?;
        debug!(
            "Restored {} ratings for {}",
            session.ratings.len(),
            session.username
        );
        Ok(session)
    }

    /// Write the session's ratings back to the store
    pub fn persist(&self, store: &dyn RatingStore) -> Result<()> {
        store.save(&self.username, &self.ratings)?;
        Ok(())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn ratings(&self) -> &UserRatings {
        &self.ratings
    }

    pub fn filters(&self) -> &BrowseFilters {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: BrowseFilters) {
        self.filters = filters;
    }

    /// Apply a navigation event and return the new view.
    ///
    /// Selecting a movie that is not in the catalog lands on the "all
    /// movies" shelf.
    pub fn navigate(&mut self, event: NavigationEvent, engine: &RecommendationEngine) -> &View {
        let next = match event {
            NavigationEvent::ShowShelf(shelf) => View::Browse(shelf),
            NavigationEvent::Search(query) => View::Search { query },
            NavigationEvent::SelectMovie(movie_id) => {
                if engine.get_movie(movie_id).is_some() {
                    View::Detail { movie_id }
                } else {
                    warn!("Movie {} not found, returning to browse", movie_id);
                    View::Browse(Shelf::All)
                }
            }
            NavigationEvent::Back => match self.view {
                View::Detail { .. } => self.return_to.clone(),
                _ => self.view.clone(),
            },
        };

        if !matches!(self.view, View::Detail { .. }) && matches!(next, View::Detail { .. }) {
            self.return_to = self.view.clone();
        }
        self.view = next;
        &self.view
    }

    /// Record a rating on the 1-10 scale, replacing any earlier one
    pub fn rate(
        &mut self,
        movie_id: MovieId,
        rating: f32,
        engine: &RecommendationEngine,
    ) -> Result<()> {
        if !(MIN_USER_RATING..=MAX_MOVIE_RATING).contains(&rating) {
            return Err(SessionError::RatingOutOfRange { rating }.into());
        }
        if engine.get_movie(movie_id).is_none() {
            return Err(SessionError::UnknownMovie { movie_id }.into());
        }
        self.ratings.insert(movie_id, rating);
        Ok(())
    }

    pub fn clear_ratings(&mut self) {
        self.ratings.clear();
    }

    /// Build the page for the current view
    pub fn current_page(&self, engine: &RecommendationEngine) -> Page {
        match &self.view {
            View::Browse(shelf) => self.shelf_page(*shelf, engine),
            View::Search { query } => {
                let movies = if query.trim().is_empty() {
                    Vec::new()
                } else {
                    engine.apply_filters(&self.filters, engine.search(query.trim()))
                };
                Page::SearchResults {
                    query: query.clone(),
                    movies,
                }
            }
            View::Detail { movie_id } => match engine.get_movie(*movie_id) {
                Some(movie) => {
                    let more_like_this = if self.ratings.is_empty() {
                        engine.similar_to(*movie_id, MORE_LIKE_THIS)
                    } else {
                        engine.hybrid(*movie_id, &self.ratings, MORE_LIKE_THIS)
                    };
                    Page::Detail {
                        movie: movie.clone(),
                        user_rating: self.ratings.get(movie_id).copied(),
                        more_like_this,
                    }
                }
                None => self.shelf_page(Shelf::All, engine),
            },
        }
    }

    fn shelf_page(&self, shelf: Shelf, engine: &RecommendationEngine) -> Page {
        let mut notice = None;
        let movies = match shelf {
            Shelf::All => engine.browse(&self.filters),
            Shelf::Recommended => {
                if self.ratings.is_empty() {
                    notice = Some("Rate some movies to get personalized recommendations!".to_string());
                }
                let recs = engine.recommend_for_profile(&self.ratings, SHELF_SIZE);
                engine.apply_filters(&self.filters, recs)
            }
            Shelf::TopRated => engine.top_rated_where(&self.filters, SHELF_SIZE),
            Shelf::Trending => engine.apply_filters(&self.filters, engine.trending(SHELF_SIZE)),
        };
        Page::Shelf {
            shelf,
            movies,
            notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::error::EngineError;
    use crate::ratings::InMemoryRatingStore;
    use catalog::{Catalog, MovieRow};
    use std::sync::Arc;

    fn create_test_engine() -> RecommendationEngine {
        let catalog = Catalog::load(vec![
            MovieRow::new(1, "Heat", 1995, 8.3)
                .with_genre("Crime, Drama")
                .with_director("Michael Mann"),
            MovieRow::new(2, "Thief", 1981, 7.4)
                .with_genre("Crime")
                .with_director("Michael Mann"),
            MovieRow::new(3, "Arrival", 2016, 7.9)
                .with_genre("Drama, Sci-Fi")
                .with_director("Denis Villeneuve"),
            MovieRow::new(4, "Dune", 2021, 8.0)
                .with_genre("Sci-Fi")
                .with_director("Denis Villeneuve"),
        ])
        .unwrap();
        RecommendationEngine::new(Arc::new(catalog), EngineConfig::default()).unwrap()
    }

    fn ids(movies: &[MovieRecommendation]) -> Vec<MovieId> {
        movies.iter().map(|m| m.movie_id).collect()
    }

    #[test]
    fn test_starts_on_all_movies() {
        let engine = create_test_engine();
        let session = Session::new("ana");

        assert_eq!(session.view(), &View::Browse(Shelf::All));
        match session.current_page(&engine) {
            Page::Shelf { shelf, movies, notice } => {
                assert_eq!(shelf, Shelf::All);
                assert_eq!(ids(&movies), vec![1, 2, 3, 4]);
                assert!(notice.is_none());
            }
            page => panic!("unexpected page {page:?}"),
        }
    }

    #[test]
    fn test_back_returns_to_origin() {
        let engine = create_test_engine();
        let mut session = Session::new("ana");

        session.navigate(NavigationEvent::Search("mann".into()), &engine);
        session.navigate(NavigationEvent::SelectMovie(1), &engine);
        // Following "more like this" keeps the original return point
        session.navigate(NavigationEvent::SelectMovie(2), &engine);
        assert_eq!(session.view(), &View::Detail { movie_id: 2 });

        let view = session.navigate(NavigationEvent::Back, &engine);
        assert_eq!(view, &View::Search { query: "mann".into() });
    }

    #[test]
    fn test_unknown_movie_goes_to_browse() {
        let engine = create_test_engine();
        let mut session = Session::new("ana");
        session.navigate(NavigationEvent::ShowShelf(Shelf::Trending), &engine);

        let view = session.navigate(NavigationEvent::SelectMovie(404), &engine);
        assert_eq!(view, &View::Browse(Shelf::All));
    }

    #[test]
    fn test_rate_validation() {
        let engine = create_test_engine();
        let mut session = Session::new("ana");

        assert!(matches!(
            session.rate(1, 0.5, &engine),
            Err(EngineError::Session(SessionError::RatingOutOfRange { .. }))
        ));
        assert!(matches!(
            session.rate(1, 10.5, &engine),
            Err(EngineError::Session(SessionError::RatingOutOfRange { .. }))
        ));
        assert!(matches!(
            session.rate(404, 8.0, &engine),
            Err(EngineError::Session(SessionError::UnknownMovie { movie_id: 404 }))
        ));

        session.rate(1, 9.0, &engine).unwrap();
        session.rate(1, 10.0, &engine).unwrap();
        assert_eq!(session.ratings(), &UserRatings::from([(1, 10.0)]));

        session.clear_ratings();
        assert!(session.ratings().is_empty());
    }

    #[test]
    fn test_recommended_shelf_without_ratings() {
        let engine = create_test_engine();
        let mut session = Session::new("ana");
        session.navigate(NavigationEvent::ShowShelf(Shelf::Recommended), &engine);

        match session.current_page(&engine) {
            Page::Shelf { movies, notice, .. } => {
                assert!(notice.is_some());
                assert_eq!(ids(&movies), vec![1, 4, 3, 2]);
            }
            page => panic!("unexpected page {page:?}"),
        }
    }

    #[test]
    fn test_filters_apply_to_shelves() {
        let engine = create_test_engine();
        let mut session = Session::new("ana");
        session.set_filters(BrowseFilters::default().with_genre("sci-fi").with_years(2000, 2030));

        session.navigate(NavigationEvent::ShowShelf(Shelf::TopRated), &engine);
        match session.current_page(&engine) {
            Page::Shelf { movies, .. } => assert_eq!(ids(&movies), vec![4, 3]),
            page => panic!("unexpected page {page:?}"),
        }

        session.navigate(NavigationEvent::ShowShelf(Shelf::Trending), &engine);
        match session.current_page(&engine) {
            Page::Shelf { movies, .. } => assert_eq!(ids(&movies), vec![4, 3]),
            page => panic!("unexpected page {page:?}"),
        }
    }

    #[test]
    fn test_empty_search_shows_nothing() {
        let engine = create_test_engine();
        let mut session = Session::new("ana");
        session.navigate(NavigationEvent::Search("  ".into()), &engine);

        match session.current_page(&engine) {
            Page::SearchResults { movies, .. } => assert!(movies.is_empty()),
            page => panic!("unexpected page {page:?}"),
        }
    }

    #[test]
    fn test_detail_uses_hybrid_once_rated() {
        let engine = create_test_engine();
        let mut session = Session::new("ana");
        session.navigate(NavigationEvent::SelectMovie(1), &engine);

        match session.current_page(&engine) {
            Page::Detail { movie, user_rating, more_like_this } => {
                assert_eq!(movie.id, 1);
                assert_eq!(user_rating, None);
                assert_eq!(more_like_this, engine.similar_to(1, MORE_LIKE_THIS));
            }
            page => panic!("unexpected page {page:?}"),
        }

        session.rate(4, 9.0, &engine).unwrap();
        match session.current_page(&engine) {
            Page::Detail { more_like_this, .. } => {
                assert_eq!(more_like_this, engine.hybrid(1, session.ratings(), MORE_LIKE_THIS));
            }
            page => panic!("unexpected page {page:?}"),
        }
    }

    #[test]
    fn test_persist_and_restore() {
        let engine = create_test_engine();
        let store = InMemoryRatingStore::new();

        let mut session = Session::new("ana");
        session.rate(3, 8.5, &engine).unwrap();
        session.persist(&store).unwrap();

        let restored = Session::restore("ana", &store).unwrap();
        assert_eq!(restored.ratings(), &UserRatings::from([(3, 8.5)]));
        assert_eq!(restored.view(), &View::Browse(Shelf::All));
    }
}
