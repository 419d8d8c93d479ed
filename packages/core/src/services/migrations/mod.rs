//! Schema Migration Implementations
//!
//! Concrete migration steps, grouped by the node type they rewrite.
//!
//! ## Available Migrations
//!
//! - `section` - Section default-view display state (v1, v3)
//! - `section_container` - Card view layout state (v2)
//!
//! ## Example Usage
//!
//! ```rust
//! # use quire_core::services::migration_registry::MigrationRegistry;
//! # use quire_core::services::migrations;
//! let mut registry = MigrationRegistry::new();
//! migrations::register_migrations(&mut registry);
//! assert_eq!(registry.current_version(), 3);
//! ```

pub mod section;
pub mod section_container;

use crate::services::migration_registry::MigrationRegistry;

/// Register every built-in migration step
pub fn register_migrations(registry: &mut MigrationRegistry) {
    section::register_migrations(registry);
    section_container::register_migrations(registry);
}
