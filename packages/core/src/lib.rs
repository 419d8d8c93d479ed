//! Quire Core
//!
//! Content tree model, structural editing and schema migrations for Quire
//! documents.
//!
//! # Architecture
//!
//! - **Owned tree**: every container exclusively owns its children; moving a
//!   node is remove-then-insert of an owned value, and lookups hand back ids
//! - **Synchronous edits**: structural operations mutate the tree in place
//!   and either succeed completely or leave it untouched
//! - **Lazy migration**: persisted documents carry a schema `version` and are
//!   upgraded on read, over raw JSON, before they are decoded
//!
//! # Modules
//!
//! - [`models`] - Documents, sections, containers, paragraphs and their views
//! - [`traversal`] - Tree walks over typed trees and raw JSON documents
//! - [`operations`] - Paragraph, section and heading-level edits
//! - [`services`] - Migration registry, document service and editor service
//! - [`db`] - Document store boundary
//! - [`utils`] - Markdown export and slug helpers
//! - [`config`] - Editor configuration

pub mod config;
pub mod db;
pub mod models;
pub mod operations;
pub mod services;
pub mod traversal;
pub mod utils;

// Re-export commonly used types
pub use config::EditorConfig;
pub use models::*;
pub use operations::{EditError, EditResult};
pub use services::*;
