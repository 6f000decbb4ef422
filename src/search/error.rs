//! Search-specific error types
//!
//! # Error Types
//!
//! - **`Api`**: The id search or the hydrate request failed (wraps `ApiError`)
//! - **`InvalidQuery`**: The query was rejected before anything was sent

use thiserror::Error;

/// Search-specific errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// Remote request failed during search
    #[error("Search request failed: {0}")]
    Api(#[from] crate::api::ApiError),

    /// Query cannot be sent as-is
    #[error("Invalid search: {0}")]
    InvalidQuery(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
