use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// None of these are fatal to a request: callers treat a failed cache call as
/// a miss and fall through to the document store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
