use async_trait::async_trait;
use serde_json::Value;

use super::{Document, Result};

/// The document database: schemaless JSON documents grouped in named
/// collections and addressed by string id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Gets a document by id.
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Gets every document in a collection, in no particular order.
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>>;

    /// Gets documents whose top-level `field` equals `value`.
    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
        limit: Option<usize>,
    ) -> Result<Vec<Document>>;

    /// Writes a new document. Fails with `AlreadyExists` if the id is taken.
    async fn create(&self, collection: &str, id: &str, document: Document) -> Result<()>;

    /// Writes a full document, replacing any existing one with the same id.
    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<()>;

    /// Shallow-merges `partial` into an existing document.
    async fn update(&self, collection: &str, id: &str, partial: Document) -> Result<()>;

    /// Deletes a document by id.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}

/// Narrow persistence capability handed to the cache-aside orchestrator.
///
/// Domain services supply one per entity kind (or per scope, e.g. the
/// activities of a single event); tests supply fakes.
#[async_trait]
pub trait Loader<T>: Send + Sync {
    /// Loads one item. `Ok(None)` means it does not exist.
    async fn fetch(&self, id: &str) -> Result<Option<T>>;

    /// Loads the whole collection this loader is scoped to.
    async fn fetch_all(&self) -> Result<Vec<T>>;

    /// Persists a newly created item.
    async fn persist(&self, item: &T) -> Result<()>;

    /// Persists changes to an existing item.
    async fn update(&self, item: &T) -> Result<()>;

    /// Removes an item.
    async fn remove(&self, id: &str) -> Result<()>;
}
