//! Storage error types

use thiserror::Error;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Duplicate entity: {0}")]
    DuplicateEntity(String),

    #[error("Duplicate relation: {0}")]
    DuplicateRelation(String),

    #[error("Duplicate project: {0}")]
    DuplicateProject(String),

    #[error("Invalid graph document: {0}")]
    InvalidDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub(crate) fn lock<E: std::fmt::Display>(e: E) -> Self {
        Self::Database(format!("Lock error: {}", e))
    }
}

impl From<StorageError> for tessera_core::Error {
    fn from(e: StorageError) -> Self {
        use tessera_core::Error;

        match e {
            StorageError::ProjectNotFound(p) => Error::ProjectNotFound(p),
            StorageError::EntityNotFound(id) => Error::EntityNotFound(id),
            StorageError::InvalidDocument(_)
            | StorageError::DuplicateEntity(_)
            | StorageError::DuplicateRelation(_)
            | StorageError::DuplicateProject(_) => Error::InvalidArgument(e.to_string()),
            other => Error::Storage(other.to_string()),
        }
    }
}
