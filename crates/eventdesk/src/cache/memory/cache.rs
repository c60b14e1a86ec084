//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with per-entry TTL using tokio
//! synchronization primitives and an LRU eviction policy. Expired entries are
//! dropped when a read finds them and by [`Cache::purge_expired`], which the
//! background [`CacheSweeper`](super::CacheSweeper) calls on an interval.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;
use tokio::time::Instant;

use eventdesk_core::cache::{Cache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access. Every
/// operation takes the write lock (LRU reads reorder the list), so get, set and
/// delete are atomic with respect to each other.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of entries before LRU eviction kicks in.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;

        let expired = match store.get(key) {
            Some(entry) if !entry.is_expired(Instant::now()) => {
                return Ok(Some(entry.value.clone()))
            }
            Some(_) => true,
            None => false,
        };

        // Lazy cleanup: an expired entry found by a read is dropped right away.
        if expired {
            store.pop(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;

        if ttl.is_some_and(|d| d.is_zero()) {
            store.pop(key);
            return Ok(());
        }

        store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize> {
        let mut store = self.store.write().await;
        let now = Instant::now();

        let expired: Vec<String> = store
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            store.pop(key);
        }

        Ok(expired.len())
    }

    async fn entry_count(&self) -> Result<usize> {
        Ok(self.store.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Default max entries for tests
    const TEST_MAX_ENTRIES: usize = 1000;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache
            .set("articles-1", b"value", Some(Duration::from_secs(300)))
            .await
            .unwrap();

        assert_eq!(cache.get("articles-1").await.unwrap(), Some(b"value".to_vec()));
    }

    #[tokio::test]
    async fn test_get_never_set() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        assert_eq!(cache.get("events").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("events", b"[]", None).await.unwrap();
        cache.delete("events").await.unwrap();

        assert_eq!(cache.get("events").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.delete("missing").await.unwrap();
        cache.delete("missing").await.unwrap();

        assert_eq!(cache.entry_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_overwrite_value() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("k", b"first", None).await.unwrap();
        cache.set("k", b"second", None).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some(b"second".to_vec()));
        assert_eq!(cache.entry_count().await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_reads_as_missing() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache
            .set("activities_ev1", b"[]", Some(Duration::from_secs(60)))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.get("activities_ev1").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get("activities_ev1").await.unwrap().is_none());

        // Expired entry was dropped by the read itself
        assert_eq!(cache.entry_count().await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ttl_never_expires() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("k", b"persistent", None).await.unwrap();
        tokio::time::advance(Duration::from_secs(365 * 24 * 3600)).await;

        assert!(cache.get("k").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_zero_ttl_stores_nothing() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("k", b"old", None).await.unwrap();
        cache.set("k", b"new", Some(Duration::ZERO)).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), None);
        assert_eq!(cache.entry_count().await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired_removes_only_expired() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache
            .set("short", b"1", Some(Duration::from_secs(60)))
            .await
            .unwrap();
        cache
            .set("long", b"2", Some(Duration::from_secs(1800)))
            .await
            .unwrap();
        cache.set("forever", b"3", None).await.unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(cache.purge_expired().await.unwrap(), 1);
        assert_eq!(cache.entry_count().await.unwrap(), 2);
        assert!(cache.get("long").await.unwrap().is_some());
        assert!(cache.get("forever").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let cache = MemoryCache::new(3);

        cache.set("key1", b"value1", None).await.unwrap();
        cache.set("key2", b"value2", None).await.unwrap();
        cache.set("key3", b"value3", None).await.unwrap();

        // Access key1 to make it recently used
        cache.get("key1").await.unwrap();

        // Insert a 4th entry - should evict key2 (least recently used)
        cache.set("key4", b"value4", None).await.unwrap();

        assert!(cache.get("key1").await.unwrap().is_some());
        assert!(cache.get("key2").await.unwrap().is_none());
        assert!(cache.get("key3").await.unwrap().is_some());
        assert!(cache.get("key4").await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_writers_do_not_lose_keys() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        let tasks: Vec<_> = (0..500)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    let key = format!("articles-{}", i);
                    cache.set(&key, key.as_bytes(), None).await.unwrap();
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(cache.entry_count().await.unwrap(), 500);
        assert_eq!(cache.get("articles-7").await.unwrap(), Some(b"articles-7".to_vec()));
    }

    #[tokio::test]
    #[should_panic(expected = "max_entries must be > 0")]
    async fn test_zero_max_entries_panics() {
        let _ = MemoryCache::new(0);
    }
}
