//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against an [`AppContext`].

pub mod auth;
pub mod breeds;
pub mod config;
pub mod favorites;
pub mod matching;
pub mod search;

// Re-export execute functions for convenience
pub use breeds::execute as breeds;
pub use config::execute as config;
pub use favorites::execute as favorites;
pub use matching::execute as matching;

use crate::DogeError;
use crate::api::ApiClient;
use crate::config::DogeConfig;
use crate::db::Database;
use crate::favorites::FavoritesStore;
use crate::search::SearchEngine;
use crate::session::{SessionStore, User};

/// Everything a command needs: configuration plus the three stores
///
/// The stores share one API client (and so one cookie jar) and one database.
pub struct AppContext {
    pub config: DogeConfig,
    pub api: ApiClient,
    pub db: Database,
    pub session: SessionStore,
    pub search: SearchEngine,
    pub favorites: FavoritesStore,
    pub quiet: bool,
}

impl AppContext {
    /// Open the database, build the client and restore any saved session
    ///
    /// Favorites start on the restored user's set, or anonymous.
    ///
    /// # Errors
    ///
    /// Returns `DogeError` if the base URL is invalid or the database or the
    /// saved favorites cannot be opened.
    pub fn new(config: DogeConfig, quiet: bool) -> Result<Self, DogeError> {
        let api = ApiClient::new(&config.api_base_url, config.request_timeout())?;
        let db = Database::open(&config.database_path)?;
        Self::with_parts(config, api, db, quiet)
    }

    /// Build a context over an existing client and database
    ///
    /// # Errors
    ///
    /// Returns `DogeError` if the saved favorites cannot be read.
    pub fn with_parts(config: DogeConfig, api: ApiClient, db: Database, quiet: bool) -> Result<Self, DogeError> {
        let session = SessionStore::restore(api.clone(), db.clone(), config.session_ttl());

        let favorites = match session.current_user() {
            Some(user) => FavoritesStore::for_user(api.clone(), db.clone(), user)?,
            None => FavoritesStore::new(api.clone(), db.clone()),
        };

        Ok(Self {
            search: SearchEngine::new(api.clone()),
            config,
            api,
            db,
            session,
            favorites,
            quiet,
        })
    }

    /// The logged-in user
    ///
    /// # Errors
    ///
    /// Returns `DogeError::NotAuthenticated` if there is no valid session.
    pub fn require_user(&self) -> Result<&User, DogeError> {
        self.session.current_user().ok_or(DogeError::NotAuthenticated)
    }

    /// Print an informational line unless quiet
    pub fn info(&self, message: impl std::fmt::Display) {
        if !self.quiet {
            println!("{message}");
        }
    }
}
