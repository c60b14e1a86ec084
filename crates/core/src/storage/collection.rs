//! Typed view over one collection of the document store.

use std::cmp::Ordering;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::cache::Identifiable;

use super::{Document, DocumentStore, Loader, RepositoryError, Result};

type Order<T> = fn(&T, &T) -> Ordering;

/// Maps documents of a named collection to and from `T`.
///
/// Implements [`Loader<T>`] so it can be handed straight to the cache-aside
/// orchestrator.
pub struct TypedCollection<T> {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
    order: Option<Order<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for TypedCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            name: self.name,
            order: self.order,
            _marker: PhantomData,
        }
    }
}

impl<T> TypedCollection<T>
where
    T: Identifiable + Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn DocumentStore>, name: &'static str) -> Self {
        Self {
            store,
            name,
            order: None,
            _marker: PhantomData,
        }
    }

    /// Sorts every multi-document read with `order`.
    pub fn sorted_by(mut self, order: Order<T>) -> Self {
        self.order = Some(order);
        self
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>> {
        self.store
            .get_by_id(self.name, id)
            .await?
            .map(from_document)
            .transpose()
    }

    pub async fn all(&self) -> Result<Vec<T>> {
        let documents = self.store.get_all(self.name).await?;
        self.collect(documents)
    }

    pub async fn query(&self, field: &str, value: &Value, limit: Option<usize>) -> Result<Vec<T>> {
        let documents = self
            .store
            .query_by_field(self.name, field, value, limit)
            .await?;
        self.collect(documents)
    }

    /// Stores a new item. Fails with `AlreadyExists` if its id is taken.
    pub async fn insert(&self, item: &T) -> Result<()> {
        self.store
            .create(self.name, item.id(), to_document(item)?)
            .await
    }

    pub async fn replace(&self, item: &T) -> Result<()> {
        self.store
            .update(self.name, item.id(), to_document(item)?)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(self.name, id).await
    }

    fn collect(&self, documents: Vec<Document>) -> Result<Vec<T>> {
        let mut items = documents
            .into_iter()
            .map(from_document)
            .collect::<Result<Vec<T>>>()?;
        if let Some(order) = self.order {
            items.sort_by(order);
        }
        Ok(items)
    }
}

#[async_trait]
impl<T> Loader<T> for TypedCollection<T>
where
    T: Identifiable + Serialize + DeserializeOwned + Send + Sync,
{
    async fn fetch(&self, id: &str) -> Result<Option<T>> {
        self.get(id).await
    }

    async fn fetch_all(&self) -> Result<Vec<T>> {
        self.all().await
    }

    async fn persist(&self, item: &T) -> Result<()> {
        self.insert(item).await
    }

    async fn update(&self, item: &T) -> Result<()> {
        self.replace(item).await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.delete(id).await
    }
}

/// Converts a value into a document. Fails unless `T` serializes to a JSON object.
pub fn to_document<T: Serialize>(item: &T) -> Result<Document> {
    match serde_json::to_value(item) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(RepositoryError::Serialization(format!(
            "expected a JSON object, got {}",
            other
        ))),
        Err(err) => Err(RepositoryError::Serialization(err.to_string())),
    }
}

/// Converts a stored document back into `T`.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T> {
    serde_json::from_value(Value::Object(document))
        .map_err(|err| RepositoryError::Serialization(err.to_string()))
}
