//! Background eviction of expired cache entries.
//!
//! Reads already treat expired entries as missing; the sweeper bounds memory
//! for keys that are never read again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use eventdesk_core::cache::Cache;

/// Default interval between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(120);

/// Handle to a running sweep task.
///
/// Call [`shutdown`](Self::shutdown) for a graceful stop. Dropping the handle
/// aborts the task.
pub struct CacheSweeper {
    shutdown_tx: broadcast::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl CacheSweeper {
    /// Spawns a task that calls [`Cache::purge_expired`] every `interval`.
    ///
    /// The first sweep runs one full interval after spawning. A zero interval
    /// is raised to one millisecond.
    pub fn spawn(cache: Arc<dyn Cache>, interval: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let period = interval.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            tracing::debug!(interval_ms = period.as_millis() as u64, "Cache sweeper started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match cache.purge_expired().await {
                            Ok(0) => {}
                            Ok(evicted) => {
                                tracing::debug!(evicted, "Evicted expired cache entries");
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "Cache sweep failed");
                            }
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::debug!("Cache sweeper shutting down");
                        break;
                    }
                }
            }
        });

        Self {
            shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Stops the sweep task and waits for it to finish.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(());

        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "Cache sweeper task failed");
            }
        }
    }
}

impl Drop for CacheSweeper {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory::MemoryCache;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_without_reads() {
        let cache = Arc::new(MemoryCache::new(100));
        cache
            .set("events", b"[]", Some(Duration::from_secs(60)))
            .await
            .unwrap();
        cache.set("users-1", b"{}", None).await.unwrap();

        let sweeper = CacheSweeper::spawn(cache.clone(), Duration::from_secs(120));

        // Before the first sweep the expired entry is still held
        tokio::time::sleep(Duration::from_secs(90)).await;
        assert_eq!(cache.entry_count().await.unwrap(), 2);

        // After the first sweep only the non-expiring entry remains
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(cache.entry_count().await.unwrap(), 1);

        sweeper.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_sweeping() {
        let cache = Arc::new(MemoryCache::new(100));
        let sweeper = CacheSweeper::spawn(cache.clone(), Duration::from_secs(1));
        sweeper.shutdown().await;

        cache
            .set("k", b"v", Some(Duration::from_secs(1)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;

        // Still held: nothing swept it, and nothing has read it
        assert_eq!(cache.entry_count().await.unwrap(), 1);
    }
}
