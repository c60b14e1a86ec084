//! Shared application state.
//!
//! Cloned into every request handler. Holds the domain services plus the
//! shared cache handles that the health endpoint reports on.

use std::sync::Arc;

use eventdesk_core::cache::Cache;
use eventdesk_core::storage::DocumentStore;

use crate::config::Config;
use crate::services::{ActivityService, ArticleService, EventService, UserService};
use crate::storage::CacheAside;

#[derive(Clone)]
pub struct AppState {
    pub articles: ArticleService,
    pub events: EventService,
    pub activities: ActivityService,
    pub users: UserService,
    /// Orchestrator shared by every service, kept here for its stats.
    pub aside: Arc<CacheAside>,
    /// The process-wide cache store.
    pub cache: Arc<dyn Cache>,
}

impl AppState {
    /// Wires every service onto one document store and one cache.
    pub fn new(store: Arc<dyn DocumentStore>, cache: Arc<dyn Cache>, config: &Config) -> Self {
        let aside = Arc::new(CacheAside::new(cache.clone()));

        Self {
            articles: ArticleService::new(store.clone(), aside.clone(), &config.ttl),
            events: EventService::new(store.clone(), aside.clone(), &config.ttl),
            activities: ActivityService::new(store.clone(), aside.clone(), &config.ttl),
            users: UserService::new(store, aside.clone(), &config.ttl),
            aside,
            cache,
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        use crate::cache::MemoryCache;
        use crate::storage::InMemoryDocumentStore;

        Self::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(MemoryCache::new(1_000)),
            &Config::default(),
        )
    }
}
