use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during customer repository operations.
///
/// Absence is not an error: lookups return `Ok(None)` when nothing matches.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The stored record changed after the caller started its read-modify-write cycle.
    #[error("Customer {id} was modified after the request started")]
    ConcurrencyConflict { id: Uuid },
    #[error("Operation not supported: {operation}")]
    Unsupported { operation: &'static str },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Returns true when retrying the whole read-modify-write cycle may succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::ConcurrencyConflict { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Errors that can occur during image store operations.
///
/// A missing object is not an error: fetches return `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageStoreError {
    #[error("Object store request failed: {0}")]
    Backend(String),
    #[error("Failed to read object body: {0}")]
    Body(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Result type for image store operations.
pub type ImageResult<T> = std::result::Result<T, ImageStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrency_conflict_display() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap();
        let error = RepositoryError::ConcurrencyConflict { id };
        assert_eq!(
            error.to_string(),
            "Customer 550e8400-e29b-41d4-a716-446655440001 was modified after the request started"
        );
    }

    #[test]
    fn test_unsupported_display() {
        let error = RepositoryError::Unsupported {
            operation: "get_all",
        };
        assert_eq!(error.to_string(), "Operation not supported: get_all");
    }

    #[test]
    fn test_query_failed_display() {
        let error = RepositoryError::QueryFailed("Throughput exceeded".to_string());
        assert_eq!(error.to_string(), "Query failed: Throughput exceeded");
    }

    #[test]
    fn test_is_conflict() {
        assert!(RepositoryError::ConcurrencyConflict { id: Uuid::nil() }.is_conflict());
        assert!(!RepositoryError::QueryFailed("boom".to_string()).is_conflict());
        assert!(!RepositoryError::Unsupported { operation: "get_all" }.is_conflict());
    }

    #[test]
    fn test_image_store_error_display() {
        assert_eq!(
            ImageStoreError::Backend("AccessDenied".to_string()).to_string(),
            "Object store request failed: AccessDenied"
        );
        assert_eq!(
            ImageStoreError::Body("connection reset".to_string()).to_string(),
            "Failed to read object body: connection reset"
        );
    }
}
