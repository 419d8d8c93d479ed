//! Document Service
//!
//! The storage-read path: every document coming out of a [`DocumentStore`]
//! passes through the migration registry before it is decoded, and a blob
//! that was upgraded is written back so the next read is a plain decode.

use crate::db::DocumentStore;
use crate::models::time::TimeProvider;
use crate::models::Document;
use crate::services::error::DocumentServiceError;
use crate::services::migration_registry::{document_version, migrate_document_if_needed, MigrationRegistry};
use std::sync::Arc;
use tracing::{info, warn};

/// Loads, upgrades and persists documents
///
/// # Examples
///
/// ```rust
/// use quire_core::db::InMemoryDocumentStore;
/// use quire_core::models::time::SystemTimeProvider;
/// use quire_core::services::{DocumentService, MigrationRegistry};
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let service = DocumentService::new(
///     Arc::new(InMemoryDocumentStore::new()),
///     Arc::new(MigrationRegistry::with_builtin_steps()),
/// );
///
/// let created = service.create("Notes", &SystemTimeProvider).await.unwrap();
/// let loaded = service.load(&created.id).await.unwrap();
/// assert_eq!(loaded, created);
/// # });
/// ```
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    migration_registry: Arc<MigrationRegistry>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>, migration_registry: Arc<MigrationRegistry>) -> Self {
        Self {
            store,
            migration_registry,
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn migration_registry(&self) -> &MigrationRegistry {
        &self.migration_registry
    }

    /// Read, upgrade and decode the document `id`
    ///
    /// Validation problems are logged, not returned: a document that loaded
    /// is handed to the caller even if it breaks a tree invariant.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` when the store has no blob under `id`
    /// - `StoreError` when reading or writing back fails
    /// - `SerializationError` when the upgraded blob does not decode
    pub async fn load(&self, id: &str) -> Result<Document, DocumentServiceError> {
        let stored = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| DocumentServiceError::document_not_found(id))?;

        let from_version = document_version(&stored);
        let migrated = migrate_document_if_needed(&self.migration_registry, stored);
        let to_version = document_version(&migrated);

        let document: Document = serde_json::from_value(migrated.clone())?;

        if to_version > from_version {
            self.store.put(id, migrated).await?;
            info!(
                document_id = id,
                from = from_version,
                to = to_version,
                "wrote back migrated document"
            );
        }

        if let Err(violation) = document.validate() {
            warn!(document_id = id, %violation, "loaded document breaks a tree invariant");
        }

        Ok(document)
    }

    /// Persist `document` under its own id
    pub async fn save(&self, document: &Document) -> Result<(), DocumentServiceError> {
        let value = serde_json::to_value(document)?;
        self.store.put(&document.id, value).await?;
        info!(document_id = %document.id, "saved document");
        Ok(())
    }

    /// Create and persist an empty document
    pub async fn create(
        &self,
        title: &str,
        clock: &dyn TimeProvider,
    ) -> Result<Document, DocumentServiceError> {
        let document = Document::blank(title, clock.now());
        self.save(&document).await?;
        Ok(document)
    }

    /// Remove the document `id`
    ///
    /// # Errors
    ///
    /// `DocumentNotFound` when nothing was stored under `id`.
    pub async fn delete(&self, id: &str) -> Result<(), DocumentServiceError> {
        if !self.store.delete(id).await? {
            return Err(DocumentServiceError::document_not_found(id));
        }
        info!(document_id = id, "deleted document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryDocumentStore;
    use crate::models::time::MockTimeProvider;
    use crate::models::CURRENT_SCHEMA_VERSION;
    use serde_json::{json, Value};

    fn service() -> (DocumentService, Arc<InMemoryDocumentStore>) {
        let store = Arc::new(InMemoryDocumentStore::new());
        let service = DocumentService::new(
            store.clone(),
            Arc::new(MigrationRegistry::with_builtin_steps()),
        );
        (service, store)
    }

    fn legacy_document() -> Value {
        json!({
            "type": "document",
            "id": "doc-legacy",
            "title": "Legacy",
            "created": "2024-01-01T00:00:00Z",
            "last_modified": "2024-01-01T00:00:00Z",
            "content": {
                "type": "section",
                "id": "s1",
                "created": "2024-01-01T00:00:00Z",
                "last_modified": "2024-01-01T00:00:00Z",
                "heading": {
                    "type": "heading",
                    "id": "h1",
                    "created": "2024-01-01T00:00:00Z",
                    "last_modified": "2024-01-01T00:00:00Z",
                    "content": "Intro",
                    "level": 1,
                    "view": [{ "type": "content/heading/default" }],
                    "activeView": "content/heading/default"
                },
                "view": [
                    { "type": "collection/section/default", "state": "summary" },
                    { "type": "collection/section/static" },
                    { "type": "collection/section/page" }
                ],
                "activeView": "collection/section/default",
                "children": [],
                "summary": []
            }
        })
    }

    #[tokio::test]
    async fn test_load_missing_document() {
        let (service, _) = service();
        let err = service.load("nope").await.unwrap_err();
        assert!(matches!(err, DocumentServiceError::DocumentNotFound { .. }));
    }

    #[tokio::test]
    async fn test_load_migrates_and_writes_back() {
        let (service, store) = service();
        store.put("doc-legacy", legacy_document()).await.unwrap();

        let doc = service.load("doc-legacy").await.unwrap();
        assert_eq!(doc.version, CURRENT_SCHEMA_VERSION);

        let section = doc.content.as_section().unwrap();
        let display = section.display().unwrap();
        assert_eq!(display.state, crate::models::DisplayState::Summary);
        assert_eq!(display.variation, "default");
        assert_eq!(display.animation, "none");

        let stored = store.get("doc-legacy").await.unwrap().unwrap();
        assert_eq!(stored["version"], CURRENT_SCHEMA_VERSION);
        assert_eq!(
            stored["content"]["view"][0]["state"],
            json!({ "state": "summary", "variation": "default", "animation": "none" })
        );
    }

    #[tokio::test]
    async fn test_current_document_is_not_rewritten() {
        let (service, store) = service();
        let clock = MockTimeProvider::at("2025-02-23T01:04:00Z");
        let created = service.create("Fresh", &clock).await.unwrap();

        // A stored blob with an extra field survives a load untouched
        let mut stored = store.get(&created.id).await.unwrap().unwrap();
        stored["marker"] = json!(true);
        store.put(&created.id, stored.clone()).await.unwrap();

        service.load(&created.id).await.unwrap();
        assert_eq!(store.get(&created.id).await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_undecodable_document() {
        let (service, store) = service();
        store.put("broken", json!({ "id": "broken" })).await.unwrap();

        let err = service.load("broken").await.unwrap_err();
        assert!(matches!(err, DocumentServiceError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let (service, _) = service();
        let clock = MockTimeProvider::at("2025-02-23T01:04:00Z");
        let created = service.create("Doomed", &clock).await.unwrap();

        service.delete(&created.id).await.unwrap();
        assert!(matches!(
            service.delete(&created.id).await,
            Err(DocumentServiceError::DocumentNotFound { .. })
        ));
    }
}
