use thiserror::Error;

/// Errors raised by the document store and the loaders built on it.
///
/// The cache-aside layer never swallows these: they reach the HTTP layer
/// unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{collection} document not found: {id}")]
    NotFound { collection: String, id: String },
    #[error("{collection} document already exists: {id}")]
    AlreadyExists { collection: String, id: String },
    #[error("Document store unavailable: {0}")]
    Unavailable(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn already_exists(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = RepositoryError::not_found("articles", "42");
        assert_eq!(error.to_string(), "articles document not found: 42");
    }

    #[test]
    fn test_already_exists_display() {
        let error = RepositoryError::already_exists("events", "ev-1");
        assert_eq!(error.to_string(), "events document already exists: ev-1");
    }

    #[test]
    fn test_unavailable_display() {
        let error = RepositoryError::Unavailable("connection reset".to_string());
        assert_eq!(error.to_string(), "Document store unavailable: connection reset");
    }

    #[test]
    fn test_invalid_data_display() {
        let error = RepositoryError::InvalidData("title must not be empty".to_string());
        assert_eq!(error.to_string(), "Invalid data: title must not be empty");
    }
}
