//! In-memory [`DocumentStore`] implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use eventdesk_core::storage::{Document, DocumentStore, RepositoryError, Result, ID_FIELD};

type Collections = HashMap<String, HashMap<String, Document>>;

/// In-memory document store.
///
/// Multi-document reads return documents in no particular order; callers that
/// need one sort after reading.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<Collections>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryDocumentStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with [`RepositoryError::Unavailable`]
    /// until switched back.
    #[cfg(test)]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
        tracing::info!(offline, "Document store availability changed");
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "in-memory store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn get_all(&self, collection: &str) -> Result<Vec<Document>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|documents| documents.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
        limit: Option<usize>,
    ) -> Result<Vec<Document>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .values()
            .filter(|document| document.get(field) == Some(value))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn create(&self, collection: &str, id: &str, mut document: Document) -> Result<()> {
        self.ensure_online()?;
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();
        if documents.contains_key(id) {
            return Err(RepositoryError::already_exists(collection, id));
        }
        documents.insert(id.to_string(), document);
        Ok(())
    }

    async fn set(&self, collection: &str, id: &str, mut document: Document) -> Result<()> {
        self.ensure_online()?;
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, partial: Document) -> Result<()> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(id))
            .ok_or_else(|| RepositoryError::not_found(collection, id))?;

        for (field, value) in partial {
            if field != ID_FIELD {
                document.insert(field, value);
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        collections
            .get_mut(collection)
            .and_then(|documents| documents.remove(id))
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(collection, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(document) => document,
            _ => panic!("expected a JSON object"),
        }
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemoryDocumentStore::new();
        store
            .set("articles", "1", doc(json!({ "title": "Hello" })))
            .await
            .unwrap();

        let fetched = store.get_by_id("articles", "1").await.unwrap().unwrap();
        assert_eq!(fetched.get("title"), Some(&json!("Hello")));
        assert_eq!(fetched.get("id"), Some(&json!("1")));
    }

    #[tokio::test]
    async fn test_create_rejects_taken_id() {
        let store = InMemoryDocumentStore::new();
        store
            .create("events", "e1", doc(json!({ "title": "Launch" })))
            .await
            .unwrap();

        let err = store
            .create("events", "e1", doc(json!({ "title": "Other" })))
            .await
            .unwrap_err();
        assert_eq!(err, RepositoryError::already_exists("events", "e1"));

        let event = store.get_by_id("events", "e1").await.unwrap().unwrap();
        assert_eq!(event.get("title"), Some(&json!("Launch")));

        store.create("articles", "e1", Document::new()).await.unwrap();
    }

    #[tokio::test]
    async fn test_set_overwrites_existing() {
        let store = InMemoryDocumentStore::new();
        store.set("events", "e1", doc(json!({ "title": "Launch" }))).await.unwrap();
        store.set("events", "e1", doc(json!({ "title": "Relaunch" }))).await.unwrap();

        let event = store.get_by_id("events", "e1").await.unwrap().unwrap();
        assert_eq!(event.get("title"), Some(&json!("Relaunch")));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = InMemoryDocumentStore::new();
        assert!(store.get_by_id("articles", "1").await.unwrap().is_none());
        assert!(store.get_all("articles").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = InMemoryDocumentStore::new();
        store.set("articles", "1", Document::new()).await.unwrap();

        assert!(store.get_by_id("events", "1").await.unwrap().is_none());
        assert_eq!(store.get_all("articles").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_query_by_field_with_limit() {
        let store = InMemoryDocumentStore::new();
        for (id, event) in [("a1", "ev1"), ("a2", "ev1"), ("a3", "ev2"), ("a4", "ev1")] {
            store
                .set("activities", id, doc(json!({ "eventId": event })))
                .await
                .unwrap();
        }

        let all = store
            .query_by_field("activities", "eventId", &json!("ev1"), None)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let limited = store
            .query_by_field("activities", "eventId", &json!("ev1"), Some(2))
            .await
            .unwrap();
        assert_eq!(limited.len(), 2);

        let none = store
            .query_by_field("activities", "eventId", &json!("ev9"), None)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_shallowly() {
        let store = InMemoryDocumentStore::new();
        store
            .set("users", "u1", doc(json!({ "displayName": "Ana", "role": "member" })))
            .await
            .unwrap();

        store
            .update("users", "u1", doc(json!({ "role": "admin", "id": "other" })))
            .await
            .unwrap();

        let user = store.get_by_id("users", "u1").await.unwrap().unwrap();
        assert_eq!(user.get("displayName"), Some(&json!("Ana")));
        assert_eq!(user.get("role"), Some(&json!("admin")));
        assert_eq!(user.get("id"), Some(&json!("u1")));
    }

    #[tokio::test]
    async fn test_update_missing_fails() {
        let store = InMemoryDocumentStore::new();
        let err = store
            .update("users", "ghost", Document::new())
            .await
            .unwrap_err();
        assert_eq!(err, RepositoryError::not_found("users", "ghost"));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryDocumentStore::new();
        store.set("events", "e1", Document::new()).await.unwrap();

        store.delete("events", "e1").await.unwrap();
        assert!(store.get_by_id("events", "e1").await.unwrap().is_none());

        let err = store.delete("events", "e1").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let store = InMemoryDocumentStore::new();
        store.set("events", "e1", Document::new()).await.unwrap();
        store.set_offline(true);

        assert!(matches!(
            store.get_by_id("events", "e1").await,
            Err(RepositoryError::Unavailable(_))
        ));
        assert!(matches!(
            store.set("events", "e2", Document::new()).await,
            Err(RepositoryError::Unavailable(_))
        ));

        store.set_offline(false);
        assert!(store.get_by_id("events", "e1").await.unwrap().is_some());
        assert!(store.get_by_id("events", "e2").await.unwrap().is_none());
    }
}
