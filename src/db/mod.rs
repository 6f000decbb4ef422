//! Database wrapper module for dogematch
//!
//! Provides a clean API for the small amount of state kept on the client,
//! using sled as the embedded database backend.
//!
//! Uses one sled tree per record kind:
//! - `session`: the current session record under a fixed key
//! - `favorites`: email -> favorite dogs
//! - `searches`: the last search and its cursors, for `next`/`prev`

use sled::{Db, Tree};
use std::path::Path;

use crate::Dog;
use crate::search::SavedSearch;
use crate::session::Session;

pub mod error;

pub use error::DbError;

/// Fixed key of the session record
pub const SESSION_KEY: &str = "user_session";

const LAST_SEARCH_KEY: &str = "last";

/// Database wrapper that encapsulates all database operations
///
/// Clones share the same underlying sled database.
#[derive(Clone)]
pub struct Database {
    db: Db,
    session: Tree,
    favorites: Tree,
    searches: Tree,
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use dogematch::db::Database;
    /// let db = Database::open("my_db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or if the internal trees cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let session = db.open_tree("session")?;
        let favorites = db.open_tree("favorites")?;
        let searches = db.open_tree("searches")?;
        Ok(Self { db, session, favorites, searches })
    }

    /// Persist the session record, replacing any previous one
    ///
    /// The record is stored as JSON, the same shape the browser kept in its
    /// session cookie.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if serialization or the write fails.
    pub fn save_session(&self, session: &Session) -> Result<(), DbError> {
        let value = serde_json::to_vec(session)
            .map_err(|e| DbError::SerializeError(e.to_string()))?;
        self.session.insert(SESSION_KEY, value)?;
        self.flush()
    }

    /// Read the session record
    ///
    /// # Returns
    /// * `Ok(Some(Session))` if a readable record exists
    /// * `Ok(None)` if there is no record
    ///
    /// # Errors
    ///
    /// Returns `DbError::Malformed` if the stored bytes are not a session
    /// record, or `DbError` if the read fails.
    pub fn load_session(&self) -> Result<Option<Session>, DbError> {
        match self.session.get(SESSION_KEY)? {
            Some(value) => serde_json::from_slice(&value)
                .map(Some)
                .map_err(|e| DbError::Malformed { record: "session", reason: e.to_string() }),
            None => Ok(None),
        }
    }

    /// Remove the session record
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the removal fails.
    pub fn clear_session(&self) -> Result<(), DbError> {
        self.session.remove(SESSION_KEY)?;
        self.flush()
    }

    /// Store raw bytes under the session key
    ///
    /// Only useful for exercising the malformed-record path.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the write fails.
    #[doc(hidden)]
    pub fn put_raw_session(&self, bytes: &[u8]) -> Result<(), DbError> {
        self.session.insert(SESSION_KEY, bytes)?;
        self.flush()
    }

    /// Replace the favorites of `email`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if encoding or the write fails.
    pub fn save_favorites(&self, email: &str, dogs: &[Dog]) -> Result<(), DbError> {
        let value = bincode::encode_to_vec(dogs, bincode::config::standard())?;
        self.favorites.insert(email.as_bytes(), value)?;
        self.flush()
    }

    /// Get the favorites of `email`, empty if none were saved
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the read or decoding fails.
    pub fn load_favorites(&self, email: &str) -> Result<Vec<Dog>, DbError> {
        match self.favorites.get(email.as_bytes())? {
            Some(value) => {
                let (dogs, _): (Vec<Dog>, usize) =
                    bincode::decode_from_slice(&value, bincode::config::standard())?;
                Ok(dogs)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Drop every favorite of `email`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the removal fails.
    pub fn clear_favorites(&self, email: &str) -> Result<(), DbError> {
        self.favorites.remove(email.as_bytes())?;
        self.flush()
    }

    /// Remember the last committed search
    ///
    /// # Errors
    ///
    /// Returns `DbError` if serialization or the write fails.
    pub fn save_last_search(&self, search: &SavedSearch) -> Result<(), DbError> {
        let value = serde_json::to_vec(search)
            .map_err(|e| DbError::SerializeError(e.to_string()))?;
        self.searches.insert(LAST_SEARCH_KEY, value)?;
        self.flush()
    }

    /// Read the last committed search, if any
    ///
    /// # Errors
    ///
    /// Returns `DbError::Malformed` if the stored record cannot be decoded.
    pub fn load_last_search(&self) -> Result<Option<SavedSearch>, DbError> {
        match self.searches.get(LAST_SEARCH_KEY)? {
            Some(value) => serde_json::from_slice(&value)
                .map(Some)
                .map_err(|e| DbError::Malformed { record: "search", reason: e.to_string() }),
            None => Ok(None),
        }
    }

    /// Forget the last search
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the removal fails.
    pub fn clear_last_search(&self) -> Result<(), DbError> {
        self.searches.remove(LAST_SEARCH_KEY)?;
        self.flush()
    }

    /// Flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }

    /// Clear all trees
    ///
    /// # Errors
    ///
    /// Returns `DbError` if clearing any tree fails.
    pub fn clear(&self) -> Result<(), DbError> {
        self.session.clear()?;
        self.favorites.clear()?;
        self.searches.clear()?;
        self.flush()
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Best-effort flush; errors cannot be propagated from Drop.
        let _ = self.db.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchQuery, SortOrder};
    use crate::session::{Session, User};
    use crate::testing::{TestDb, dog};
    use chrono::{Duration, Utc};

    #[test]
    fn test_session_round_trip() {
        let test_db = TestDb::new();
        let db = test_db.db();

        let session = Session::new(User::new("Ana", "ana@x.com"), Utc::now() + Duration::hours(1));
        db.save_session(&session).unwrap();

        assert_eq!(db.load_session().unwrap(), Some(session));
    }

    #[test]
    fn test_missing_session_is_none() {
        let test_db = TestDb::new();
        assert!(test_db.db().load_session().unwrap().is_none());
    }

    #[test]
    fn test_malformed_session() {
        let test_db = TestDb::new();
        let db = test_db.db();

        db.put_raw_session(b"{not json").unwrap();

        assert!(matches!(
            db.load_session(),
            Err(DbError::Malformed { record: "session", .. })
        ));
    }

    #[test]
    fn test_clear_session() {
        let test_db = TestDb::new();
        let db = test_db.db();

        let session = Session::new(User::new("Ana", "ana@x.com"), Utc::now());
        db.save_session(&session).unwrap();
        db.clear_session().unwrap();

        assert!(db.load_session().unwrap().is_none());
    }

    #[test]
    fn test_favorites_are_keyed_by_email() {
        let test_db = TestDb::new();
        let db = test_db.db();

        db.save_favorites("ana@x.com", &[dog("d1"), dog("d2")]).unwrap();
        db.save_favorites("bo@x.com", &[dog("d3")]).unwrap();

        let ana: Vec<String> = db.load_favorites("ana@x.com").unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ana, vec!["d1", "d2"]);
        assert_eq!(db.load_favorites("bo@x.com").unwrap(), vec![dog("d3")]);
        assert!(db.load_favorites("nobody@x.com").unwrap().is_empty());
    }

    #[test]
    fn test_clear_favorites() {
        let test_db = TestDb::new();
        let db = test_db.db();

        db.save_favorites("ana@x.com", &[dog("d1")]).unwrap();
        db.clear_favorites("ana@x.com").unwrap();

        assert!(db.load_favorites("ana@x.com").unwrap().is_empty());
    }

    #[test]
    fn test_last_search_round_trip() {
        let test_db = TestDb::new();
        let db = test_db.db();

        let saved = SavedSearch {
            query: SearchQuery::builder()
                .breed("Boxer")
                .sort(SortOrder::default())
                .size(25)
                .build(),
            total: 40,
            next: Some("/dogs/search?size=25&from=25".to_string()),
            prev: None,
        };
        db.save_last_search(&saved).unwrap();

        assert_eq!(db.load_last_search().unwrap(), Some(saved));

        db.clear_last_search().unwrap();
        assert!(db.load_last_search().unwrap().is_none());
    }

    #[test]
    fn test_reopen_keeps_favorites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db");

        {
            let db = Database::open(&path).unwrap();
            db.save_favorites("ana@x.com", &[dog("d1")]).unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.load_favorites("ana@x.com").unwrap(), vec![dog("d1")]);
    }
}
