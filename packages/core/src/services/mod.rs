//! Business Services
//!
//! This module contains the document-level services:
//!
//! - `MigrationRegistry` - Versioned schema upgrades of persisted documents
//! - `DocumentService` - Storage-read path: load, migrate, write back, decode
//! - `EditorService` - Structural edits against a whole `Document`
//!
//! Services coordinate between the store, the migration engine and the
//! structural operations.

pub mod document_service;
pub mod editor_service;
pub mod error;
pub mod migration_registry;
pub mod migrations;

pub use document_service::DocumentService;
pub use editor_service::EditorService;
pub use error::DocumentServiceError;
pub use migration_registry::{migrate_document_if_needed, MigrationRegistry, MigrationStep};
