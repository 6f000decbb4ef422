//! Error types for favorites operations

use thiserror::Error;

/// Errors that can occur during favorites operations
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// Match requested with nothing in the favorites set
    #[error("Please add some dogs to your favorites first")]
    Empty,

    /// A match is already being generated
    #[error("A match is already being generated")]
    MatchInProgress,

    /// The service matched an id it would not hydrate
    #[error("Matched dog '{0}' could not be loaded")]
    MatchNotFound(String),

    /// Remote request failed
    #[error("Request failed: {0}")]
    Api(#[from] crate::api::ApiError),

    /// Persisting the favorites failed
    #[error("Could not save favorites: {0}")]
    Database(#[from] crate::db::DbError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_empty_message() {
        assert_eq!(
            FavoritesError::Empty.to_string(),
            "Please add some dogs to your favorites first"
        );
    }

    #[test]
    fn test_from_api_error() {
        let error: FavoritesError = ApiError::Status { status: 500, endpoint: "/dogs/match" }.into();
        assert!(matches!(error, FavoritesError::Api(_)));
        assert!(error.to_string().contains("/dogs/match"));
    }

    #[test]
    fn test_match_not_found_message() {
        let error = FavoritesError::MatchNotFound("d9".to_string());
        assert_eq!(error.to_string(), "Matched dog 'd9' could not be loaded");
    }
}
