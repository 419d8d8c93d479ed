//! Schema Migration Registry
//!
//! Persisted documents carry a schema `version`. Before a document is edited
//! it is upgraded by every registered step whose target version is above the
//! document's own, in ascending order.
//!
//! ## Architecture
//!
//! - **Explicit registry**: the host builds a [`MigrationRegistry`] value and
//!   passes it to the load path; nothing registers itself globally
//! - **Raw JSON steps**: older shapes do not decode into the typed model, so
//!   each step is a pure `Value -> Value` rewrite of the whole document
//! - **Version stamping**: after each step the registry sets `version` to the
//!   step's target; a missing version reads as 0
//! - **Idempotent steps**: each rewrite checks for the old shape first, so
//!   re-running a step is harmless
//!
//! ## Example Usage
//!
//! ```rust
//! # use quire_core::services::migration_registry::{MigrationRegistry, MigrationStep};
//! # use serde_json::{json, Value};
//! fn add_flag(mut doc: Value) -> Value {
//!     doc["flag"] = json!(true);
//!     doc
//! }
//!
//! let mut registry = MigrationRegistry::new();
//! registry.register_step(MigrationStep::new(1, "add flag", add_flag));
//!
//! let upgraded = registry.migrate_value(json!({ "id": "d1" }));
//! assert_eq!(upgraded["version"], 1);
//! assert_eq!(upgraded["flag"], true);
//! ```

use crate::models::Document;
use crate::services::error::DocumentServiceError;
use crate::services::migrations;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Type alias for migration transform functions
///
/// Transforms are pure: they take the whole persisted document and return
/// the rewritten document. They do not touch `version`; the registry does.
pub type MigrationTransform = fn(Value) -> Value;

/// One versioned schema upgrade
#[derive(Debug, Clone, Copy)]
pub struct MigrationStep {
    /// Version the document is at after this step
    pub to_version: u32,
    pub description: &'static str,
    pub migrate: MigrationTransform,
}

impl MigrationStep {
    pub fn new(to_version: u32, description: &'static str, migrate: MigrationTransform) -> Self {
        Self {
            to_version,
            description,
            migrate,
        }
    }
}

/// Read a persisted document's schema version; missing or malformed reads as 0
pub fn document_version(document: &Value) -> u32 {
    document
        .get("version")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// Registry for schema migration steps
///
/// Steps are kept sorted by target version. Registering a second step for a
/// version replaces the first.
#[derive(Debug, Clone)]
pub struct MigrationRegistry {
    steps: Vec<MigrationStep>,
}

impl MigrationRegistry {
    /// Create a new empty migration registry
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Create a registry holding every built-in step
    pub fn with_builtin_steps() -> Self {
        let mut registry = Self::new();
        migrations::register_migrations(&mut registry);
        registry
    }

    /// Register a step, keeping steps ordered by target version
    pub fn register_step(&mut self, step: MigrationStep) {
        match self
            .steps
            .binary_search_by_key(&step.to_version, |s| s.to_version)
        {
            Ok(index) => self.steps[index] = step,
            Err(index) => self.steps.insert(index, step),
        }
    }

    /// Highest version any registered step upgrades to
    pub fn current_version(&self) -> u32 {
        self.steps.last().map(|s| s.to_version).unwrap_or(0)
    }

    /// Get the number of registered steps
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Whether `document` is below the registry's current version
    pub fn needs_migration(&self, document: &Value) -> bool {
        document_version(document) < self.current_version()
    }

    /// Apply every pending step to a persisted document
    ///
    /// Steps at or below the document's version are skipped. The document's
    /// `version` never moves backwards.
    pub fn migrate_value(&self, mut document: Value) -> Value {
        let start = document_version(&document);

        for step in self.steps.iter().filter(|s| s.to_version > start) {
            debug!(
                to_version = step.to_version,
                description = step.description,
                "applying migration step"
            );
            document = (step.migrate)(document);
            if let Some(object) = document.as_object_mut() {
                object.insert("version".to_string(), json!(step.to_version));
            }
        }

        let end = document_version(&document);
        if end > start {
            info!(from = start, to = end, "migrated document");
        }
        document
    }

    /// Apply pending steps and decode the result as a typed [`Document`]
    ///
    /// # Errors
    ///
    /// `SerializationError` when the migrated JSON does not match the current
    /// model.
    pub fn migrate_document(&self, document: Value) -> Result<Document, DocumentServiceError> {
        let migrated = self.migrate_value(document);
        Ok(serde_json::from_value(migrated)?)
    }
}

impl Default for MigrationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage-read entry point: upgrade `document` when it is behind
///
/// Documents already at or past the registry's version are returned as is.
pub fn migrate_document_if_needed(registry: &MigrationRegistry, document: Value) -> Value {
    if !registry.needs_migration(&document) {
        return document;
    }
    registry.migrate_value(document)
}
