//! DocumentStore Trait - Persistence Boundary
//!
//! Documents are persisted as opaque JSON blobs keyed by document id. The
//! store never interprets the blob: migration and decoding happen in
//! [`DocumentService`](crate::services::DocumentService) after a read.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: every method is async so network backends fit behind
//!    the same trait as the in-memory one
//! 2. **Raw JSON**: older schema versions do not decode into the typed
//!    model, so the store traffics in `serde_json::Value`
//!
//! # Examples
//!
//! ```rust
//! use quire_core::db::{DocumentStore, InMemoryDocumentStore};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let store = InMemoryDocumentStore::new();
//! store.put("doc-1", json!({ "id": "doc-1" })).await.unwrap();
//!
//! assert!(store.get("doc-1").await.unwrap().is_some());
//! assert_eq!(store.list_ids().await.unwrap(), vec!["doc-1".to_string()]);
//! # });
//! ```

use crate::db::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Persistence operations for document blobs
///
/// Implementations must be `Send + Sync` so a store can be shared behind an
/// `Arc` across tasks.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace the blob stored under `id`
    ///
    /// # Errors
    ///
    /// - `InvalidId` if `id` is empty
    /// - `NotAnObject` if `document` is not a JSON object
    async fn put(&self, id: &str, document: Value) -> Result<(), StoreError>;

    /// Read the blob stored under `id`, `None` if absent
    async fn get(&self, id: &str) -> Result<Option<Value>, StoreError>;

    /// Delete the blob stored under `id`
    ///
    /// Returns `true` if a blob was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Ids of every stored document, in ascending order
    async fn list_ids(&self) -> Result<Vec<String>, StoreError>;
}

/// Map-backed store for tests and tooling
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<BTreeMap<String, Value>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(&self, id: &str, document: Value) -> Result<(), StoreError> {
        if id.is_empty() {
            return Err(StoreError::invalid_id(id));
        }
        if !document.is_object() {
            return Err(StoreError::not_an_object(id));
        }
        debug!(document_id = id, "storing document");
        self.documents.write().await.insert(id.to_string(), document);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.documents.write().await.remove(id).is_some())
    }

    async fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.documents.read().await.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_replace() {
        let store = InMemoryDocumentStore::new();
        assert_eq!(store.get("d1").await.unwrap(), None);

        store.put("d1", json!({ "version": 1 })).await.unwrap();
        store.put("d1", json!({ "version": 2 })).await.unwrap();

        assert_eq!(store.get("d1").await.unwrap(), Some(json!({ "version": 2 })));
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let store = InMemoryDocumentStore::new();
        store.put("b", json!({})).await.unwrap();
        store.put("a", json!({})).await.unwrap();

        assert_eq!(store.list_ids().await.unwrap(), vec!["a", "b"]);
        assert!(store.delete("a").await.unwrap());
        assert!(!store.delete("a").await.unwrap());
        assert_eq!(store.list_ids().await.unwrap(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_put_rejects_bad_input() {
        let store = InMemoryDocumentStore::new();
        assert!(matches!(
            store.put("", json!({})).await,
            Err(StoreError::InvalidId { .. })
        ));
        assert!(matches!(
            store.put("d1", json!("text")).await,
            Err(StoreError::NotAnObject { .. })
        ));
    }
}
