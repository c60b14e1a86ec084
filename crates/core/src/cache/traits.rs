use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for basic cache operations.
///
/// Values are opaque bytes; typed access goes through
/// [`serialize`](super::serialize) and [`deserialize`](super::deserialize).
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    ///
    /// Expired entries read exactly like missing ones.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    ///
    /// `None` never expires. A zero TTL disables caching for this write: nothing
    /// is stored and any previous value under `key` is dropped.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key. Deleting a missing key is a no-op.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Evicts every expired entry and returns how many were removed.
    async fn purge_expired(&self) -> Result<usize>;

    /// Number of entries currently held, expired or not.
    async fn entry_count(&self) -> Result<usize>;
}

/// A domain entity with a stable unique identifier.
///
/// This is the only structural requirement the cache-aside layer places on
/// cached payloads.
pub trait Identifiable {
    fn id(&self) -> &str;
}
