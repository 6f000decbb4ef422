//! Search engine client
//!
//! Drives the two-phase protocol: `GET /dogs/search` for a page of ids and
//! cursors, then one `POST /dogs` to hydrate exactly those ids. The current
//! page is replaced wholesale on every committed search.
//!
//! Searches may overlap. Each call takes a sequence number when it is
//! dispatched, and its response is only committed if no newer call was
//! dispatched in the meantime; otherwise it reports
//! [`SearchOutcome::Superseded`] and leaves the state alone.
//!
//! On failure the page is cleared and [`SearchEngine::error`] carries a
//! displayable message.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::cursor::Cursor;
use super::error::SearchError;
use super::query::SearchQuery;
use crate::Dog;
use crate::api::ApiClient;

/// One committed page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    /// Records in the order the hydrate request returned them
    pub dogs: Vec<Dog>,
    pub total: u64,
    pub next: Option<Cursor>,
    pub prev: Option<Cursor>,
    /// The query this page answers
    pub query: SearchQuery,
}

impl SearchPage {
    /// Whether a following page really exists
    ///
    /// A next cursor alone is not enough: it must carry an offset that
    /// still points before `total`.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next
            .as_ref()
            .and_then(Cursor::offset)
            .is_some_and(|from| u64::from(from) < self.total)
    }

    /// Whether a preceding page exists
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.prev.as_ref().and_then(Cursor::offset).is_some() && self.query.from.unwrap_or(0) > 0
    }

    /// Query for the following page, if there is one
    #[must_use]
    pub fn next_query(&self) -> Option<SearchQuery> {
        if !self.has_next() {
            return None;
        }
        self.next
            .as_ref()
            .and_then(Cursor::offset)
            .map(|from| self.query.clone().with_from(from))
    }

    /// Query for the preceding page, if there is one
    #[must_use]
    pub fn prev_query(&self) -> Option<SearchQuery> {
        if !self.has_prev() {
            return None;
        }
        self.prev
            .as_ref()
            .and_then(Cursor::offset)
            .map(|from| self.query.clone().with_from(from))
    }

    /// Display counters for this page
    #[must_use]
    pub fn info(&self) -> PageInfo {
        let size = u64::from(self.query.size.max(1));
        PageInfo {
            page: self.query.page_index() + 1,
            total_pages: self.total.div_ceil(size),
            showing: self.dogs.len(),
            total: self.total,
        }
    }

    /// The part of this page worth keeping between runs
    #[must_use]
    pub fn to_saved(&self) -> SavedSearch {
        SavedSearch {
            query: self.query.clone(),
            total: self.total,
            next: self.next.as_ref().map(|c| c.raw().to_string()),
            prev: self.prev.as_ref().map(|c| c.raw().to_string()),
        }
    }
}

impl From<SavedSearch> for SearchPage {
    fn from(saved: SavedSearch) -> Self {
        Self {
            dogs: Vec::new(),
            total: saved.total,
            next: saved.next.map(Cursor::new),
            prev: saved.prev.map(Cursor::new),
            query: saved.query,
        }
    }
}

/// Page position for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based page number
    pub page: u32,
    pub total_pages: u64,
    /// Records on this page
    pub showing: usize,
    pub total: u64,
}

/// Search state persisted between CLI invocations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub query: SearchQuery,
    pub total: u64,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// What happened to a search call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response became the current page
    Applied(SearchPage),
    /// A newer search was dispatched first; this response was dropped
    Superseded,
}

impl SearchOutcome {
    /// The committed page, if this call won
    #[must_use]
    pub const fn page(&self) -> Option<&SearchPage> {
        match self {
            Self::Applied(page) => Some(page),
            Self::Superseded => None,
        }
    }
}

#[derive(Default)]
struct EngineState {
    page: Option<SearchPage>,
    query: Option<SearchQuery>,
    error: Option<String>,
    loading: bool,
    breeds: Option<Vec<String>>,
    breeds_error: Option<String>,
}

/// Client-side search state over the remote search endpoints
pub struct SearchEngine {
    api: ApiClient,
    state: Mutex<EngineState>,
    issued: AtomicU64,
}

impl SearchEngine {
    /// Create an engine with no results yet
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(EngineState::default()),
            issued: AtomicU64::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All breed names, fetched once and then cached
    ///
    /// A failed fetch returns an empty list, records [`Self::breeds_error`]
    /// and is retried on the next call. Searching does not depend on it.
    pub async fn list_breeds(&self) -> Vec<String> {
        if let Some(breeds) = self.state().breeds.clone() {
            return breeds;
        }

        match self.api.breeds().await {
            Ok(breeds) => {
                let mut state = self.state();
                state.breeds = Some(breeds.clone());
                state.breeds_error = None;
                breeds
            }
            Err(e) => {
                warn!(error = %e, "could not fetch breeds");
                self.state().breeds_error = Some(format!("Failed to fetch breeds: {e}"));
                Vec::new()
            }
        }
    }

    /// Message from the last failed breed fetch
    #[must_use]
    pub fn breeds_error(&self) -> Option<String> {
        self.state().breeds_error.clone()
    }

    /// Run a search and, unless superseded, make it the current page
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidQuery` without any request when the
    /// query does not validate, or `SearchError::Api` if either request
    /// fails. Errors of superseded calls are dropped like their results.
    pub async fn search(&self, query: SearchQuery) -> Result<SearchOutcome, SearchError> {
        if let Err(reason) = query.validate() {
            self.state().error = Some(reason.clone());
            return Err(SearchError::InvalidQuery(reason));
        }

        let seq = {
            let mut state = self.state();
            state.loading = true;
            state.error = None;
            state.query = Some(query.clone());
            self.issued.fetch_add(1, Ordering::SeqCst) + 1
        };
        debug!(seq, params = ?query.to_params(), "search dispatched");

        let result = self.fetch_page(query).await;

        let mut state = self.state();
        if self.issued.load(Ordering::SeqCst) != seq {
            debug!(seq, "discarding stale search response");
            return Ok(SearchOutcome::Superseded);
        }

        state.loading = false;
        match result {
            Ok(page) => {
                debug!(seq, total = page.total, shown = page.dogs.len(), "search committed");
                state.page = Some(page.clone());
                Ok(SearchOutcome::Applied(page))
            }
            Err(e) => {
                warn!(seq, error = %e, "search failed");
                state.page = None;
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn fetch_page(&self, query: SearchQuery) -> Result<SearchPage, SearchError> {
        let response = self.api.search(&query.to_params()).await?;

        let dogs = if response.result_ids.is_empty() {
            Vec::new()
        } else {
            self.api.fetch_dogs(&response.result_ids).await?
        };

        Ok(SearchPage {
            dogs,
            total: response.total,
            next: response.next.map(Cursor::new),
            prev: response.prev.map(Cursor::new),
            query,
        })
    }

    /// Load the following page of the current search
    ///
    /// Returns `Ok(None)` when there is no following page.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` if the search itself fails.
    pub async fn next_page(&self) -> Result<Option<SearchOutcome>, SearchError> {
        let query = self.state().page.as_ref().and_then(SearchPage::next_query);
        match query {
            Some(query) => self.search(query).await.map(Some),
            None => Ok(None),
        }
    }

    /// Load the preceding page of the current search
    ///
    /// Returns `Ok(None)` when there is no preceding page.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` if the search itself fails.
    pub async fn prev_page(&self) -> Result<Option<SearchOutcome>, SearchError> {
        let query = self.state().page.as_ref().and_then(SearchPage::prev_query);
        match query {
            Some(query) => self.search(query).await.map(Some),
            None => Ok(None),
        }
    }

    /// Seed the engine with a search saved by an earlier run
    ///
    /// The page has no records, but its cursors drive `next_page`/`prev_page`.
    pub fn resume(&self, saved: SavedSearch) {
        let mut state = self.state();
        state.query = Some(saved.query.clone());
        state.page = Some(saved.into());
    }

    /// Snapshot of the current page
    #[must_use]
    pub fn page(&self) -> Option<SearchPage> {
        self.state().page.clone()
    }

    /// The most recently dispatched query
    #[must_use]
    pub fn current_query(&self) -> Option<SearchQuery> {
        self.state().query.clone()
    }

    /// Message from the last failed search, cleared when a new one starts
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// True between dispatch and response of the latest search
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.state().page.as_ref().is_some_and(SearchPage::has_next)
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.state().page.as_ref().is_some_and(SearchPage::has_prev)
    }

    #[must_use]
    pub fn page_info(&self) -> Option<PageInfo> {
        self.state().page.as_ref().map(SearchPage::info)
    }
}
