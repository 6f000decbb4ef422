//! Favorites store
//!
//! Keeps the dogs a user has marked, scoped to their identity:
//! - With an identity, the set is persisted under the user's email and
//!   every mutation is written to the database before it returns.
//! - Without one (anonymous), the set lives in memory only.
//!
//! Switching identity swaps the whole view to that identity's saved set.
//! The store also generates a match: all favorite ids go to the service,
//! which picks one, and that id is hydrated into a full record.
//!
//! # Examples
//!
//! ```no_run
//! use dogematch::{api::ApiClient, db::Database, favorites::FavoritesStore, session::User};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ApiClient::new("https://frontend-take-home-service.fetch.com", Duration::from_secs(30))?;
//! let db = Database::open("my_db")?;
//! let store = FavoritesStore::for_user(api, db, &User::new("Ana", "ana@x.com"))?;
//!
//! if !store.is_empty() {
//!     let dog = store.generate_match().await?;
//!     println!("Matched with {}", dog.name);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::Dog;
use crate::api::ApiClient;
use crate::db::Database;
use crate::session::User;

pub mod error;

pub use error::FavoritesError;

#[derive(Default)]
struct FavoritesState {
    /// Email the set is persisted under; `None` keeps it in memory
    owner: Option<String>,
    dogs: Vec<Dog>,
    matched: Option<Dog>,
    error: Option<String>,
}

/// Identity-scoped set of favorite dogs
pub struct FavoritesStore {
    api: ApiClient,
    db: Database,
    state: Mutex<FavoritesState>,
    matching: AtomicBool,
}

/// Clears the in-flight flag however `generate_match` exits
struct MatchGuard<'a>(&'a AtomicBool);

impl Drop for MatchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FavoritesStore {
    /// Create an anonymous, memory-only store
    #[must_use]
    pub fn new(api: ApiClient, db: Database) -> Self {
        Self {
            api,
            db,
            state: Mutex::new(FavoritesState::default()),
            matching: AtomicBool::new(false),
        }
    }

    /// Create a store showing `user`'s saved favorites
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::Database` if the saved set cannot be read.
    pub fn for_user(api: ApiClient, db: Database, user: &User) -> Result<Self, FavoritesError> {
        let store = Self::new(api, db);
        store.switch_identity(Some(user))?;
        Ok(store)
    }

    fn state(&self) -> MutexGuard<'_, FavoritesState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Swap the view to `user`'s saved set, or to an empty anonymous set
    ///
    /// Any previous match is dropped.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::Database` if the saved set cannot be read;
    /// the previous view is kept in that case.
    pub fn switch_identity(&self, user: Option<&User>) -> Result<(), FavoritesError> {
        let dogs = match user {
            Some(user) => self.db.load_favorites(&user.email)?,
            None => Vec::new(),
        };

        let mut state = self.state();
        state.owner = user.map(|u| u.email.clone());
        state.dogs = dogs;
        state.matched = None;
        state.error = None;
        info!(owner = ?state.owner, count = state.dogs.len(), "favorites loaded");
        Ok(())
    }

    /// Email the set belongs to, `None` when anonymous
    #[must_use]
    pub fn owner(&self) -> Option<String> {
        self.state().owner.clone()
    }

    /// Add a dog; returns false if it was already a favorite
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::Database` if the write fails; the set is
    /// left unchanged.
    pub fn add(&self, dog: Dog) -> Result<bool, FavoritesError> {
        let mut state = self.state();
        if state.dogs.iter().any(|d| d.id == dog.id) {
            return Ok(false);
        }

        let mut dogs = state.dogs.clone();
        debug!(id = %dog.id, "adding favorite");
        dogs.push(dog);
        self.commit(&mut state, dogs)?;
        Ok(true)
    }

    /// Remove a dog by id; returns false if it was not a favorite
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::Database` if the write fails; the set is
    /// left unchanged.
    pub fn remove(&self, id: &str) -> Result<bool, FavoritesError> {
        let mut state = self.state();
        if !state.dogs.iter().any(|d| d.id == id) {
            return Ok(false);
        }

        let dogs: Vec<Dog> = state.dogs.iter().filter(|d| d.id != id).cloned().collect();
        debug!(id, "removing favorite");
        self.commit(&mut state, dogs)?;
        Ok(true)
    }

    /// Add the dog if absent, remove it if present
    ///
    /// Returns whether the dog is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::Database` if the write fails.
    pub fn toggle(&self, dog: Dog) -> Result<bool, FavoritesError> {
        if self.contains(&dog.id) {
            self.remove(&dog.id)?;
            Ok(false)
        } else {
            self.add(dog)?;
            Ok(true)
        }
    }

    /// Remove every favorite
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::Database` if the write fails.
    pub fn clear(&self) -> Result<(), FavoritesError> {
        let mut state = self.state();
        if let Some(email) = &state.owner {
            self.db.clear_favorites(email)?;
        }
        state.dogs.clear();
        Ok(())
    }

    fn commit(&self, state: &mut FavoritesState, dogs: Vec<Dog>) -> Result<(), FavoritesError> {
        if let Some(email) = &state.owner {
            self.db.save_favorites(email, &dogs)?;
        }
        state.dogs = dogs;
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.state().dogs.iter().any(|d| d.id == id)
    }

    /// Favorites in the order they were added
    #[must_use]
    pub fn list(&self) -> Vec<Dog> {
        self.state().dogs.clone()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.state().dogs.iter().map(|d| d.id.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state().dogs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state().dogs.is_empty()
    }

    /// The last generated match
    #[must_use]
    pub fn matched(&self) -> Option<Dog> {
        self.state().matched.clone()
    }

    /// Message from the last failed match attempt
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// True while `generate_match` is waiting on the service
    #[must_use]
    pub fn is_matching(&self) -> bool {
        self.matching.load(Ordering::Acquire)
    }

    /// Ask the service to pick one dog out of the favorites
    ///
    /// # Errors
    ///
    /// - `FavoritesError::Empty` if there are no favorites; nothing is sent
    /// - `FavoritesError::MatchInProgress` if another call is pending
    /// - `FavoritesError::Api` if either request fails
    /// - `FavoritesError::MatchNotFound` if the matched id does not hydrate
    pub async fn generate_match(&self) -> Result<Dog, FavoritesError> {
        let ids = self.ids();
        if ids.is_empty() {
            let error = FavoritesError::Empty;
            self.state().error = Some(error.to_string());
            return Err(error);
        }

        if self
            .matching
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(FavoritesError::MatchInProgress);
        }
        let _guard = MatchGuard(&self.matching);

        self.state().error = None;
        let result = self.fetch_match(&ids).await;

        let mut state = self.state();
        match result {
            Ok(dog) => {
                info!(id = %dog.id, "match generated");
                state.matched = Some(dog.clone());
                Ok(dog)
            }
            Err(e) => {
                warn!(error = %e, "match failed");
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn fetch_match(&self, ids: &[String]) -> Result<Dog, FavoritesError> {
        let matched = self.api.match_dogs(ids).await?;
        let dogs = self.api.fetch_dogs(std::slice::from_ref(&matched)).await?;

        dogs.into_iter()
            .find(|d| d.id == matched)
            .ok_or(FavoritesError::MatchNotFound(matched))
    }
}
