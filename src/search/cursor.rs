//! Pagination cursors
//!
//! The search endpoint hands back `next`/`prev` as opaque strings such as
//! `/dogs/search?size=25&from=25&sort=breed%3Aasc`. The only thing the client
//! needs from them is the embedded offset, which is extracted once here.

use reqwest::Url;
use serde::{Deserialize, Serialize};

const CURSOR_BASE: &str = "http://cursor.invalid/";

/// An opaque next/prev token with its offset already extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Cursor {
    raw: String,
    offset: Option<u32>,
}

impl Cursor {
    /// Wrap a token returned by the service
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let offset = parse_offset(&raw);
        Self { raw, offset }
    }

    /// The token as the service sent it
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The `from` offset encoded in the token, if it has a usable one
    #[must_use]
    pub const fn offset(&self) -> Option<u32> {
        self.offset
    }
}

impl From<String> for Cursor {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        cursor.raw
    }
}

fn parse_offset(raw: &str) -> Option<u32> {
    let query = raw.split_once('?').map_or(raw, |(_, q)| q);
    let mut url = Url::parse(CURSOR_BASE).ok()?;
    url.set_query(Some(query));

    url.query_pairs()
        .find(|(key, _)| key == "from")
        .and_then(|(_, value)| value.parse().ok())
}
