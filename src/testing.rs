//! Testing utilities for dogematch
//!
//! This module provides helper types and functions for writing tests,
//! including a `TestDb` wrapper for temporary database management.
//!
//! Only available when compiled with `cfg(test)`.

use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;

use crate::Dog;
use crate::api::ApiClient;
use crate::db::Database;

/// Address nothing listens on; requests fail fast with a transport error
pub const OFFLINE_BASE_URL: &str = "http://127.0.0.1:9";

/// Wrapper for a temporary test database that cleans up on drop
///
/// The database lives in its own temporary directory so parallel tests
/// never share state.
pub struct TestDb {
    db: Database,
    dir: TempDir,
}

impl TestDb {
    /// Create an empty database in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the directory or the database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("db")).expect("Failed to open test database");
        Self { db, dir }
    }

    /// Get a reference to the underlying database
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Get the directory holding the database
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

/// A dog record whose fields derive from `id`
#[must_use]
pub fn dog(id: &str) -> Dog {
    Dog::new(
        id,
        format!("Dog {id}"),
        "Boxer",
        3,
        "10001",
        format!("https://img.example/{id}.jpg"),
    )
}

/// Client pointed at an address with no server behind it
///
/// # Panics
/// Panics if the client cannot be built.
#[must_use]
pub fn offline_api() -> ApiClient {
    ApiClient::new(OFFLINE_BASE_URL, Duration::from_secs(2)).expect("Failed to build client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_starts_empty() {
        let test_db = TestDb::new();
        assert!(test_db.db().load_favorites("a@x.com").unwrap().is_empty());
        assert!(test_db.db().load_session().unwrap().is_none());
    }

    #[test]
    fn test_dbs_are_isolated() {
        let first = TestDb::new();
        let second = TestDb::new();

        first.db().save_favorites("a@x.com", &[dog("d1")]).unwrap();

        assert!(second.db().load_favorites("a@x.com").unwrap().is_empty());
        assert_ne!(first.path(), second.path());
    }

    #[test]
    fn test_dog_fixture() {
        let d = dog("d7");
        assert_eq!(d.id, "d7");
        assert_eq!(d.breed, "Boxer");
    }
}
