//! Search module
//!
//! Turns filter state into requests against the remote search endpoints:
//! 1. `SearchQuery` serializes filters into query parameters
//! 2. `SearchEngine` fetches a page of ids, then hydrates them into dogs
//! 3. `Cursor` extracts the offset from the service's next/prev tokens

pub mod cursor;
pub mod engine;
pub mod error;
pub mod query;

pub use cursor::Cursor;
pub use engine::{PageInfo, SavedSearch, SearchEngine, SearchOutcome, SearchPage};
pub use error::SearchError;
pub use query::{
    DEFAULT_PAGE_SIZE, SearchQuery, SearchQueryBuilder, SortDirection, SortField, SortOrder,
};
