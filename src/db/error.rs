//! Database-specific error types
//!
//! This module defines all error types that can occur during database operations.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`** / **`EncodeError`**: bincode failures for favorites
//! - **`SerializeError`**: JSON failures for session and search records
//! - **`Malformed`**: A stored record exists but cannot be read back
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use thiserror::Error;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Generic serialization error
    #[error("Error during serialization: {0}")]
    SerializeError(String),

    /// A stored record could not be decoded
    #[error("Malformed {record} record: {reason}")]
    Malformed { record: &'static str, reason: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
