//! Activity service.
//!
//! Activities are cached per event: the list of one event lives under
//! `activities_<eventId>`, while single activities share the `activities-<id>`
//! item namespace.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use eventdesk_core::cache::{activities_key, CacheScope, EntityKind, TtlRegistry, ACTIVITY_PREFIX};
use eventdesk_core::portal::{Activity, CreateActivityRequest, UpdateActivityRequest};
use eventdesk_core::storage::{DocumentStore, Loader, Result, TypedCollection};

use crate::storage::CacheAside;

const COLLECTION: &str = "activities";

/// Loader over the activities of a single event.
struct EventActivities<'a> {
    activities: &'a TypedCollection<Activity>,
    event_id: &'a str,
}

#[async_trait]
impl<'a> Loader<Activity> for EventActivities<'a> {
    async fn fetch(&self, id: &str) -> Result<Option<Activity>> {
        Ok(self
            .activities
            .get(id)
            .await?
            .filter(|activity| activity.event_id == self.event_id))
    }

    async fn fetch_all(&self) -> Result<Vec<Activity>> {
        let event_id = Value::String(self.event_id.to_string());
        self.activities
            .query(Activity::EVENT_FIELD, &event_id, None)
            .await
    }

    async fn persist(&self, activity: &Activity) -> Result<()> {
        self.activities.insert(activity).await
    }

    async fn update(&self, activity: &Activity) -> Result<()> {
        self.activities.replace(activity).await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.activities.delete(id).await
    }
}

#[derive(Clone)]
pub struct ActivityService {
    activities: TypedCollection<Activity>,
    aside: Arc<CacheAside>,
    ttl: Duration,
}

impl ActivityService {
    pub fn new(store: Arc<dyn DocumentStore>, aside: Arc<CacheAside>, ttl: &TtlRegistry) -> Self {
        Self {
            activities: TypedCollection::new(store, COLLECTION)
                .sorted_by(|a, b| super::newest_first(&a.created_at, &b.created_at)),
            aside,
            ttl: ttl.ttl(EntityKind::Activities),
        }
    }

    fn scope(&self, event_id: &str) -> CacheScope {
        CacheScope::new(activities_key(event_id), ACTIVITY_PREFIX, self.ttl)
    }

    fn loader<'a>(&'a self, event_id: &'a str) -> EventActivities<'a> {
        EventActivities {
            activities: &self.activities,
            event_id,
        }
    }

    /// Activities of one event, newest first.
    pub async fn list(&self, event_id: &str) -> Result<Vec<Activity>> {
        self.aside
            .get_collection(&self.scope(event_id), &self.loader(event_id))
            .await
    }

    /// One activity, only if it belongs to `event_id`.
    pub async fn get(&self, event_id: &str, id: &str) -> Result<Option<Activity>> {
        let activity: Option<Activity> = self
            .aside
            .get_item(&self.scope(event_id), id, &self.loader(event_id))
            .await?;

        // The item key is shared across events
        Ok(activity.filter(|activity| activity.event_id == event_id))
    }

    pub async fn create(&self, event_id: &str, request: CreateActivityRequest) -> Result<Activity> {
        let activity = request.into_activity(event_id)?;
        self.aside
            .create_item(&self.scope(event_id), activity, &self.loader(event_id))
            .await
    }

    pub async fn update(
        &self,
        event_id: &str,
        id: &str,
        request: UpdateActivityRequest,
    ) -> Result<Option<Activity>> {
        if self.get(event_id, id).await?.is_none() {
            return Ok(None);
        }

        let scope = self.scope(event_id);
        let loader = self.loader(event_id);
        self.aside
            .modify_item(&scope, id, &loader, |activity: &mut Activity| {
                request.apply_to(activity).map_err(Into::into)
            })
            .await
    }

    /// Returns `false` if the activity does not exist under `event_id`.
    pub async fn delete(&self, event_id: &str, id: &str) -> Result<bool> {
        if self.get(event_id, id).await?.is_none() {
            return Ok(false);
        }

        self.aside
            .delete_item::<Activity, _>(&self.scope(event_id), id, &self.loader(event_id))
            .await
    }
}
