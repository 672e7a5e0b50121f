//! Search error types

use thiserror::Error;

/// Result type alias for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Search-specific error types
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Query error: {0}")]
    Query(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SearchError> for tessera_core::Error {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Query(msg) => tessera_core::Error::InvalidArgument(msg),
            SearchError::Internal(msg) => tessera_core::Error::Internal(msg),
        }
    }
}
