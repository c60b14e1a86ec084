//! Cache-aside orchestration shared by every domain service.
//!
//! - **Reads**: check the cache; on a miss call the loader and populate the
//!   cache. Missing single items are never cached; empty collections are.
//! - **Writes**: persist through the loader first, then bring the item entry
//!   and the collection entry (when present) in line with the write.
//!
//! Loader errors propagate unchanged and leave the cache untouched. Cache
//! errors never fail an operation: they are logged and, where a stale value
//! could survive, the key is evicted.
//!
//! Item miss-fills, creates, deletes and read-modify-writes hold the item key
//! lock, so a fill that fetched before a write cannot land after it.
//! Collection miss-fills and collection rewrites hold the collection key lock.
//! Locks are always taken item first, collection second.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use eventdesk_core::cache::{deserialize, serialize, Cache, CacheScope, Identifiable};
use eventdesk_core::storage::{Loader, Result};

use super::locks::KeyLocks;

/// Hit/miss counters since process start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// The cache-aside orchestrator.
pub struct CacheAside {
    cache: Arc<dyn Cache>,
    locks: KeyLocks,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheAside {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self {
            cache,
            locks: KeyLocks::default(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Returns one item, reading through to `loader` on a miss.
    pub async fn get_item<T, L>(
        &self,
        scope: &CacheScope,
        id: &str,
        loader: &L,
    ) -> Result<Option<T>>
    where
        T: Identifiable + Serialize + DeserializeOwned,
        L: Loader<T> + ?Sized,
    {
        let key = scope.item_key(id);

        if let Some(item) = self.read::<T>(&key).await {
            self.record_hit(&key);
            return Ok(Some(item));
        }

        let _guard = self.locks.lock(&key).await;
        self.fill_item(scope, &key, id, loader).await
    }

    /// Returns the whole collection, reading through to `loader` on a miss.
    ///
    /// An empty collection is a valid cached value.
    pub async fn get_collection<T, L>(&self, scope: &CacheScope, loader: &L) -> Result<Vec<T>>
    where
        T: Identifiable + Serialize + DeserializeOwned,
        L: Loader<T> + ?Sized,
    {
        let key = scope.collection_key.as_str();

        if let Some(items) = self.read::<Vec<T>>(key).await {
            self.record_hit(key);
            return Ok(items);
        }

        let _guard = self.locks.lock(key).await;

        // Filled by another request while we waited for the lock
        if let Some(items) = self.read::<Vec<T>>(key).await {
            self.record_hit(key);
            return Ok(items);
        }

        self.record_miss(key);
        let items = loader.fetch_all().await?;
        self.write(key, &items, scope.ttl).await;

        Ok(items)
    }

    /// Persists a new item, caches it, and prepends it to the cached
    /// collection if one exists.
    pub async fn create_item<T, L>(&self, scope: &CacheScope, item: T, loader: &L) -> Result<T>
    where
        T: Identifiable + Serialize + DeserializeOwned + Clone,
        L: Loader<T> + ?Sized,
    {
        let key = scope.item_key(item.id());
        let _guard = self.locks.lock(&key).await;

        loader.persist(&item).await?;

        self.write(&key, &item, scope.ttl).await;

        self.modify_collection(scope, |items: &mut Vec<T>| {
            // A fill that raced the write may already hold the item
            items.retain(|existing| existing.id() != item.id());
            items.insert(0, item.clone());
        })
        .await;

        tracing::debug!(key = %scope.collection_key, id = %item.id(), "Cached created item");
        Ok(item)
    }

    /// Persists changes to an item and replaces it in place in the cached
    /// collection if one exists.
    ///
    /// Does not take the item key lock: callers that read before writing go
    /// through [`modify_item`](Self::modify_item), which holds it.
    pub async fn update_item<T, L>(&self, scope: &CacheScope, item: T, loader: &L) -> Result<T>
    where
        T: Identifiable + Serialize + DeserializeOwned + Clone,
        L: Loader<T> + ?Sized,
    {
        loader.update(&item).await?;

        self.write(&scope.item_key(item.id()), &item, scope.ttl).await;

        self.modify_collection(scope, |items: &mut Vec<T>| {
            if let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) {
                *slot = item.clone();
            }
        })
        .await;

        tracing::debug!(key = %scope.collection_key, id = %item.id(), "Cached updated item");
        Ok(item)
    }

    /// Reads an item, applies `apply` and persists the result, all under the
    /// item key lock. Concurrent modifications of one item never lose each
    /// other's changes.
    ///
    /// Returns `None` without calling `apply` if the item does not exist. An
    /// error from `apply` aborts the write.
    pub async fn modify_item<T, L, F>(
        &self,
        scope: &CacheScope,
        id: &str,
        loader: &L,
        apply: F,
    ) -> Result<Option<T>>
    where
        T: Identifiable + Serialize + DeserializeOwned + Clone,
        L: Loader<T> + ?Sized,
        F: FnOnce(&mut T) -> Result<()>,
    {
        let key = scope.item_key(id);
        let _guard = self.locks.lock(&key).await;

        let Some(mut item) = self.fill_item(scope, &key, id, loader).await? else {
            return Ok(None);
        };

        apply(&mut item)?;
        let item = self.update_item(scope, item, loader).await?;
        Ok(Some(item))
    }

    /// Removes an item and filters it out of the cached collection if one
    /// exists.
    ///
    /// Returns `true` once the loader succeeds; it does not report whether the
    /// item existed beforehand.
    pub async fn delete_item<T, L>(&self, scope: &CacheScope, id: &str, loader: &L) -> Result<bool>
    where
        T: Identifiable + Serialize + DeserializeOwned,
        L: Loader<T> + ?Sized,
    {
        let key = scope.item_key(id);
        let _guard = self.locks.lock(&key).await;

        loader.remove(id).await?;

        self.evict(&key).await;

        self.modify_collection(scope, |items: &mut Vec<T>| {
            items.retain(|existing| existing.id() != id);
        })
        .await;

        tracing::debug!(key = %scope.collection_key, %id, "Evicted deleted item");
        Ok(true)
    }

    /// Drops a key outright, forcing the next read to refetch.
    pub async fn invalidate(&self, key: &str) {
        let _guard = self.locks.lock(key).await;
        self.evict(key).await;
    }

    /// Item read-through body. The caller holds the item key lock.
    async fn fill_item<T, L>(
        &self,
        scope: &CacheScope,
        key: &str,
        id: &str,
        loader: &L,
    ) -> Result<Option<T>>
    where
        T: Identifiable + Serialize + DeserializeOwned,
        L: Loader<T> + ?Sized,
    {
        // Filled by another request while we waited for the lock
        if let Some(item) = self.read::<T>(key).await {
            self.record_hit(key);
            return Ok(Some(item));
        }

        self.record_miss(key);
        let item = loader.fetch(id).await?;

        // Absence is not cached: the next call asks the loader again.
        if let Some(ref item) = item {
            self.write(key, item, scope.ttl).await;
        }

        Ok(item)
    }

    /// Applies `apply` to the cached collection under its key lock.
    ///
    /// An absent collection stays absent; the next read refetches it in
    /// storage order.
    async fn modify_collection<T, F>(&self, scope: &CacheScope, apply: F)
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>),
    {
        let key = scope.collection_key.as_str();
        let _guard = self.locks.lock(key).await;

        let bytes = match self.cache.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(%key, error = %err, "Failed to read cached collection");
                self.evict(key).await;
                return;
            }
        };

        let mut items: Vec<T> = match deserialize(&bytes) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(%key, error = %err, "Cached collection failed to deserialize");
                self.evict(key).await;
                return;
            }
        };

        apply(&mut items);
        self.write(key, &items, scope.ttl).await;
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match deserialize(&bytes) {
                Ok(value) => Some(value),
                Err(err) => {
                    // Treat as a miss; the refetch overwrites it
                    tracing::warn!(%key, error = %err, "Cached value failed to deserialize");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(%key, error = %err, "Cache read failed");
                None
            }
        }
    }

    /// Best-effort write. On failure the key is evicted so no older value
    /// outlives the write.
    async fn write<V: Serialize + ?Sized>(&self, key: &str, value: &V, ttl: Duration) {
        let result = match serialize(value) {
            Ok(bytes) => self.cache.set(key, &bytes, Some(ttl)).await,
            Err(err) => Err(err.into()),
        };

        if let Err(err) = result {
            tracing::warn!(%key, error = %err, "Failed to cache value");
            self.evict(key).await;
        }
    }

    async fn evict(&self, key: &str) {
        if let Err(err) = self.cache.delete(key).await {
            tracing::warn!(%key, error = %err, "Failed to evict cache key");
        }
    }

    fn record_hit(&self, key: &str) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(%key, "Cache hit");
    }

    fn record_miss(&self, key: &str) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(%key, "Cache miss");
    }
}
