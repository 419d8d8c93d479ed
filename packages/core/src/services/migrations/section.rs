//! Section Schema Migrations
//!
//! Rewrites of the display state stored on a section's default view
//! (`collection/section/default`).
//!
//! ## Migration History
//!
//! - **→ v1**: Bare string state becomes `{ state, variation: "default" }`
//! - **→ v3**: Structured state gains `animation: "none"`

use crate::models::view::SECTION_DEFAULT_VIEW;
use crate::services::migration_registry::{MigrationRegistry, MigrationStep};
use crate::traversal::{traverse_document, NodeVisitors};
use serde_json::{json, Map, Value};

/// Register all section migrations
pub fn register_migrations(registry: &mut MigrationRegistry) {
    registry.register_step(MigrationStep::new(
        1,
        "structure section display state",
        migrate_to_v1,
    ));
    registry.register_step(MigrationStep::new(
        3,
        "add section display animation",
        migrate_to_v3,
    ));
}

/// Structure the default-view state of every section
///
/// **Before:**
/// ```json
/// { "type": "collection/section/default", "state": "expanded" }
/// ```
///
/// **After:**
/// ```json
/// { "type": "collection/section/default", "state": { "state": "expanded", "variation": "default" } }
/// ```
///
/// An object state lacking `variation` gets the default variation.
pub fn migrate_to_v1(document: Value) -> Value {
    traverse_document(
        document,
        &NodeVisitors {
            section: Some(structure_display_state),
            ..Default::default()
        },
    )
}

/// Add `animation: "none"` to every structured section display state
///
/// States that already carry an animation keep it.
pub fn migrate_to_v3(document: Value) -> Value {
    traverse_document(
        document,
        &NodeVisitors {
            section: Some(add_display_animation),
            ..Default::default()
        },
    )
}

fn default_views(section: &mut Map<String, Value>) -> impl Iterator<Item = &mut Map<String, Value>> {
    section
        .get_mut("view")
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object_mut)
        .filter(|view| view.get("type").and_then(Value::as_str) == Some(SECTION_DEFAULT_VIEW))
}

fn structure_display_state(section: &mut Map<String, Value>) {
    for view in default_views(section) {
        match view.get_mut("state") {
            Some(Value::String(state)) => {
                let state = std::mem::take(state);
                view.insert(
                    "state".to_string(),
                    json!({ "state": state, "variation": "default" }),
                );
            }
            Some(Value::Object(state)) => {
                let has_variation = state
                    .get("variation")
                    .and_then(Value::as_str)
                    .is_some_and(|v| !v.is_empty());
                if !has_variation {
                    state.insert("variation".to_string(), json!("default"));
                }
            }
            _ => {}
        }
    }
}

fn add_display_animation(section: &mut Map<String, Value>) {
    for view in default_views(section) {
        if let Some(Value::Object(state)) = view.get_mut("state") {
            state
                .entry("animation")
                .or_insert_with(|| json!("none"));
        }
    }
}
