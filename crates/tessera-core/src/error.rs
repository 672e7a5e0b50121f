//! Error types for Tessera Core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using Tessera's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Tessera error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Graph too large: {entities} entities (max {max})")]
    TooLarge { entities: usize, max: usize },

    #[error("Access denied to project {0}")]
    PermissionDenied(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Caller-visible error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    TooLarge,
    PermissionDenied,
    Internal,
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProjectNotFound(_) | Self::EntityNotFound(_) => ErrorKind::NotFound,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::TooLarge { .. } => ErrorKind::TooLarge,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::Storage(_) | Self::Serialization(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::ProjectNotFound("p".into()).kind(), ErrorKind::NotFound);
        assert_eq!(Error::EntityNotFound("e".into()).kind(), ErrorKind::NotFound);
        assert_eq!(Error::invalid("depth").kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            Error::TooLarge { entities: 10, max: 5 }.kind(),
            ErrorKind::TooLarge
        );
        assert_eq!(Error::Storage("down".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::InvalidArgument).unwrap();
        assert_eq!(json, "\"invalid_argument\"");
    }
}
