//! HTTP client for the adoption service
//!
//! `ApiClient` is the only place that speaks HTTP. It owns a `reqwest`
//! client with a shared cookie jar so the session cookie set by
//! `/auth/login` rides along on every later request, and it maps every
//! failure to [`ApiError`].
//!
//! Endpoints:
//! - `POST /auth/login` / `POST /auth/logout`
//! - `GET /dogs/breeds`
//! - `GET /dogs/search` (ids + cursors)
//! - `POST /dogs` (hydrate ids into full records)
//! - `POST /dogs/match`

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Dog;

pub mod error;

pub use error::ApiError;

const LOGIN_PATH: &str = "/auth/login";
const LOGOUT_PATH: &str = "/auth/logout";
const BREEDS_PATH: &str = "/dogs/breeds";
const SEARCH_PATH: &str = "/dogs/search";
const DOGS_PATH: &str = "/dogs";
const MATCH_PATH: &str = "/dogs/match";

/// Raw answer of `GET /dogs/search`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_ids: Vec<String>,
    pub total: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatchResponse {
    #[serde(rename = "match")]
    matched: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    name: &'a str,
    email: &'a str,
}

/// Client for the remote adoption API
///
/// Cheap to clone; clones share the connection pool and cookie jar.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    jar: Arc<Jar>,
    base_url: Url,
}

impl ApiClient {
    /// Build a client for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the URL does not parse, or
    /// `ApiError::Transport` if the TLS backend cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, jar, base_url })
    }

    /// The base URL every endpoint is resolved against
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `Cookie` header value currently held for the service, if any
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(String::from))
    }

    /// Load a previously exported `Cookie` header back into the jar
    pub fn restore_cookie(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.jar.add_cookie_str(pair, &self.base_url);
        }
    }

    /// `POST /auth/login`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx answer.
    pub async fn login(&self, name: &str, email: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(&LoginRequest { name, email })
            .send()
            .await;
        check(response, LOGIN_PATH)?;
        Ok(())
    }

    /// `POST /auth/logout`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx answer.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.client.post(self.url(LOGOUT_PATH)).send().await;
        check(response, LOGOUT_PATH)?;
        Ok(())
    }

    /// `GET /dogs/breeds`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-2xx answer or a body
    /// that is not a JSON array of strings.
    pub async fn breeds(&self) -> Result<Vec<String>, ApiError> {
        let response = self.client.get(self.url(BREEDS_PATH)).send().await;
        Ok(check(response, BREEDS_PATH)?.json().await?)
    }

    /// `GET /dogs/search` with already serialized query parameters
    ///
    /// Parameters are sent in order; repeated keys stay repeated.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-2xx answer or a
    /// malformed body.
    pub async fn search(&self, params: &[(&str, String)]) -> Result<SearchResponse, ApiError> {
        let response = self
            .client
            .get(self.url(SEARCH_PATH))
            .query(params)
            .send()
            .await;
        Ok(check(response, SEARCH_PATH)?.json().await?)
    }

    /// `POST /dogs`: turn ids into full records
    ///
    /// The service returns records in its own order, which is kept.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-2xx answer or a
    /// malformed body.
    pub async fn fetch_dogs(&self, ids: &[String]) -> Result<Vec<Dog>, ApiError> {
        let response = self.client.post(self.url(DOGS_PATH)).json(ids).send().await;
        Ok(check(response, DOGS_PATH)?.json().await?)
    }

    /// `POST /dogs/match`: returns the id the service picked
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-2xx answer or a
    /// malformed body.
    pub async fn match_dogs(&self, ids: &[String]) -> Result<String, ApiError> {
        let response = self.client.post(self.url(MATCH_PATH)).json(ids).send().await;
        let body: MatchResponse = check(response, MATCH_PATH)?.json().await?;
        Ok(body.matched)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

fn check(
    response: Result<Response, reqwest::Error>,
    endpoint: &'static str,
) -> Result<Response, ApiError> {
    let response = response.map_err(|e| {
        warn!(endpoint, error = %e, "request failed");
        ApiError::from(e)
    })?;

    let status = response.status();
    debug!(endpoint, status = status.as_u16(), "response received");

    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized { endpoint });
    }
    if !status.is_success() {
        warn!(endpoint, status = status.as_u16(), "non-success response");
        return Err(ApiError::Status { status: status.as_u16(), endpoint });
    }
    Ok(response)
}
