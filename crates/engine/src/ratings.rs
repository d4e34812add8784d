//! Rating persistence seam.
//!
//! The engine never reads or writes ratings itself; sessions load them from
//! a store at login and save them back when they change.

use crate::error::RatingStoreError;
use recommenders::UserRatings;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Per-user rating persistence
pub trait RatingStore: Send + Sync {
    /// Ratings of `username`; empty for users with none
    fn load(&self, username: &str) -> Result<UserRatings, RatingStoreError>;

    /// Replace the stored ratings of `username`
    fn save(&self, username: &str, ratings: &UserRatings) -> Result<(), RatingStoreError>;

    fn clear(&self, username: &str) -> Result<(), RatingStoreError>;
}

/// Process-local store, mostly for tests and the CLI
#[derive(Debug, Default)]
pub struct InMemoryRatingStore {
    users: RwLock<HashMap<String, UserRatings>>,
}

impl InMemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with stored ratings
    pub fn user_count(&self) -> Result<usize, RatingStoreError> {
        let users = self.users.read().map_err(|_| RatingStoreError::LockPoisoned)?;
        Ok(users.len())
    }
}

impl RatingStore for InMemoryRatingStore {
    fn load(&self, username: &str) -> Result<UserRatings, RatingStoreError> {
        let users = self.users.read().map_err(|_| RatingStoreError::LockPoisoned)?;
        Ok(users.get(username).cloned().unwrap_or_default())
    }

    fn save(&self, username: &str, ratings: &UserRatings) -> Result<(), RatingStoreError> {
        let mut users = self.users.write().map_err(|_| RatingStoreError::LockPoisoned)?;
        debug!("Saving {} ratings for {}", ratings.len(), username);
        users.insert(username.to_string(), ratings.clone());
        Ok(())
    }

    fn clear(&self, username: &str) -> Result<(), RatingStoreError> {
        let mut users = self.users.write().map_err(|_| RatingStoreError::LockPoisoned)?;
        users.remove(username);
        Ok(())
    }
}
