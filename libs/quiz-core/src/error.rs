//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using RouteError.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Errors that can occur while searching the border graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no countries with valid land borders were found in the data")]
    NoStartCandidates,

    #[error("unknown country: {0}")]
    UnknownCountry(String),

    #[error("search gave up after {limit} node expansions")]
    SearchLimitExceeded { limit: u64 },
}

/// Errors raised by a pool persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored pool is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_error_display() {
        assert_eq!(
            RouteError::UnknownCountry("Atlantis".to_string()).to_string(),
            "unknown country: Atlantis"
        );
        assert_eq!(
            RouteError::SearchLimitExceeded { limit: 10 }.to_string(),
            "search gave up after 10 node expansions"
        );
    }
}
