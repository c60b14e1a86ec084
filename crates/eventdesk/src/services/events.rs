//! Event service.

use std::sync::Arc;

use eventdesk_core::cache::{
    activities_key, CacheScope, EntityKind, TtlRegistry, EVENTS_KEY, EVENT_PREFIX,
};
use eventdesk_core::portal::{CreateEventRequest, Event, UpdateEventRequest};
use eventdesk_core::storage::{DocumentStore, Result, TypedCollection};

use crate::storage::CacheAside;

const COLLECTION: &str = "events";

#[derive(Clone)]
pub struct EventService {
    events: TypedCollection<Event>,
    aside: Arc<CacheAside>,
    scope: CacheScope,
}

impl EventService {
    pub fn new(store: Arc<dyn DocumentStore>, aside: Arc<CacheAside>, ttl: &TtlRegistry) -> Self {
        Self {
            events: TypedCollection::new(store, COLLECTION)
                .sorted_by(|a, b| super::newest_first(&a.created_at, &b.created_at)),
            aside,
            scope: CacheScope::new(EVENTS_KEY, EVENT_PREFIX, ttl.ttl(EntityKind::Events)),
        }
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        self.aside.get_collection(&self.scope, &self.events).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Event>> {
        self.aside.get_item(&self.scope, id, &self.events).await
    }

    pub async fn create(&self, request: CreateEventRequest) -> Result<Event> {
        let event = request.into_event()?;
        self.aside.create_item(&self.scope, event, &self.events).await
    }

    pub async fn update(&self, id: &str, request: UpdateEventRequest) -> Result<Option<Event>> {
        self.aside
            .modify_item(&self.scope, id, &self.events, |event: &mut Event| {
                request.apply_to(event).map_err(Into::into)
            })
            .await
    }

    /// Deletes an event and drops its cached activity list.
    ///
    /// Returns `false` if the event does not exist.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        if self.get(id).await?.is_none() {
            return Ok(false);
        }

        let deleted = self
            .aside
            .delete_item::<Event, _>(&self.scope, id, &self.events)
            .await?;

        self.aside.invalidate(&activities_key(id)).await;
        Ok(deleted)
    }

    /// Whether an event exists, read through the cache.
    pub async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }
}
