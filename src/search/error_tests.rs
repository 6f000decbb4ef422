//! Unit tests for search error types

#[cfg(test)]
mod tests {
    use crate::api::ApiError;
    use crate::search::error::SearchError;
    use std::error::Error;

    #[test]
    fn test_invalid_query_error() {
        let error = SearchError::InvalidQuery("Page size must be at least 1".to_string());
        assert_eq!(error.to_string(), "Invalid search: Page size must be at least 1");
    }

    #[test]
    fn test_api_error_from_api_error() {
        let api_error = ApiError::Status { status: 503, endpoint: "/dogs/search" };
        let search_error: SearchError = api_error.into();

        assert!(search_error.to_string().contains("Search request failed"));
        assert!(search_error.to_string().contains("503"));
    }

    #[test]
    fn test_error_source_chain() {
        let search_error = SearchError::Api(ApiError::Timeout);
        assert!(search_error.source().is_some());
    }

    #[test]
    fn test_error_source_none() {
        let error = SearchError::InvalidQuery("bad".to_string());
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_debug() {
        let error = SearchError::InvalidQuery("x".to_string());
        let debug = format!("{error:?}");
        assert!(debug.contains("InvalidQuery"));
    }
}
