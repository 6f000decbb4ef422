//! Session store
//!
//! Holds the authenticated identity. A login is a name/email handshake with
//! the service; the service answers with a session cookie and the client
//! treats the session as valid for a fixed time (one hour by default).
//!
//! The session record is persisted so the next process can restore it with
//! [`SessionStore::restore`]. Restoring never fails: a missing, malformed or
//! expired record simply means "logged out".

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::db::{Database, DbError};

/// Default lifetime of a session, in seconds
pub const DEFAULT_SESSION_TTL_SECS: i64 = 60 * 60;

/// The logged-in person
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    /// Create a new User
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into() }
    }
}

/// Persisted session record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub expires_at: DateTime<Utc>,
    /// `Cookie` header the service set at login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
}

impl Session {
    /// Create a session without a server cookie
    #[must_use]
    pub const fn new(user: User, expires_at: DateTime<Utc>) -> Self {
        Self { user, expires_at, cookie: None }
    }

    /// Whether the session is still valid at `now`
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }
}

/// Owner of the current identity
pub struct SessionStore {
    api: ApiClient,
    db: Database,
    ttl: Duration,
    session: Option<Session>,
}

impl SessionStore {
    /// Create a logged-out store
    #[must_use]
    pub const fn new(api: ApiClient, db: Database, ttl: Duration) -> Self {
        Self { api, db, ttl, session: None }
    }

    /// Create a store from whatever session record is persisted
    ///
    /// Expired and malformed records are discarded. A valid record puts its
    /// cookie back into the API client's jar.
    #[must_use]
    pub fn restore(api: ApiClient, db: Database, ttl: Duration) -> Self {
        let session = match db.load_session() {
            Ok(Some(session)) if session.is_valid_at(Utc::now()) => {
                if let Some(cookie) = &session.cookie {
                    api.restore_cookie(cookie);
                }
                debug!(email = %session.user.email, "restored session");
                Some(session)
            }
            Ok(Some(session)) => {
                info!(email = %session.user.email, expired_at = %session.expires_at, "discarding expired session");
                discard(&db);
                None
            }
            Ok(None) => None,
            Err(e @ DbError::Malformed { .. }) => {
                warn!(error = %e, "discarding unreadable session record");
                discard(&db);
                None
            }
            Err(e) => {
                warn!(error = %e, "could not read session record");
                None
            }
        };

        Self { api, db, ttl, session }
    }

    /// Log in with a name and email
    ///
    /// Returns `false` on any network or HTTP failure, or if the session
    /// lifetime does not fit a timestamp; nothing is thrown.
    pub async fn login(&mut self, name: &str, email: &str) -> bool {
        if let Err(e) = self.api.login(name, email).await {
            warn!(error = %e, "login failed");
            return false;
        }

        let Some(expires_at) = Utc::now().checked_add_signed(self.ttl) else {
            warn!(ttl_secs = self.ttl.num_seconds(), "session lifetime out of range");
            return false;
        };

        let session = Session {
            user: User::new(name, email),
            expires_at,
            cookie: self.api.session_cookie(),
        };

        if let Err(e) = self.db.save_session(&session) {
            warn!(error = %e, "session will not survive this process");
        }

        info!(email, "logged in");
        self.session = Some(session);
        true
    }

    /// Log out
    ///
    /// The remote call is best-effort; local state is always cleared.
    pub async fn logout(&mut self) {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "remote logout failed, clearing local session anyway");
        }

        self.session = None;
        discard(&self.db);
        info!("logged out");
    }

    /// Whether a non-expired session exists
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    /// Whether a session exists that is still valid at `now`
    #[must_use]
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_valid_at(now))
    }

    /// The logged-in user, while the session is valid
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.session
            .as_ref()
            .filter(|s| s.is_valid_at(Utc::now()))
            .map(|s| &s.user)
    }

    /// When the current session expires
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.session.as_ref().map(|s| s.expires_at)
    }

    /// Time left on the current session, zero once expired
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at()
            .map(|at| (at - Utc::now()).max(Duration::zero()))
    }
}

fn discard(db: &Database) {
    if let Err(e) = db.clear_session() {
        warn!(error = %e, "could not remove session record");
    }
}
