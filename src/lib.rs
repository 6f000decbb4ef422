//! Dogematch - a client for the dog adoption search service
//!
//! This library wraps the remote adoption API behind three explicit stores:
//! - [`session::SessionStore`]: name/email login, restored from local storage
//! - [`search::SearchEngine`]: filtered, cursor-paginated two-phase search
//! - [`favorites::FavoritesStore`]: per-identity favorites and match generation
//!
//! Local state (session record, favorites, last search) lives in an embedded
//! sled database, see [`db::Database`].

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod favorites;
pub mod output;
pub mod search;
pub mod session;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum DogeError {
    /// Remote API error
    #[error("API error: {0}")]
    ApiError(#[from] api::ApiError),
    /// Database error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Search error
    #[error("Search error: {0}")]
    SearchError(#[from] search::SearchError),
    /// Favorites error
    #[error("Favorites error: {0}")]
    FavoritesError(#[from] favorites::FavoritesError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// The command needs a logged-in session
    #[error("Not logged in (or the session expired). Run 'dogematch login' first.")]
    NotAuthenticated,
    /// The service rejected the login or could not be reached
    #[error("Login failed. Check the name and email, then try again.")]
    LoginFailed,
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A single adoptable dog as returned by the service
///
/// Records are immutable once fetched; `id` is the identity.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Dog {
    pub id: String,
    pub img: String,
    pub name: String,
    pub age: u32,
    pub zip_code: String,
    pub breed: String,
}

impl Dog {
    /// Create a new Dog
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        breed: impl Into<String>,
        age: u32,
        zip_code: impl Into<String>,
        img: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            img: img.into(),
            name: name.into(),
            age,
            zip_code: zip_code.into(),
            breed: breed.into(),
        }
    }
}
