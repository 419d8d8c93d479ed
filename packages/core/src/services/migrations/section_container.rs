//! Section Container Schema Migrations
//!
//! ## Migration History
//!
//! - **→ v2**: Card view state gains `multilevel: false`

use crate::models::view::SECTION_CONTAINER_CARD_VIEW;
use crate::services::migration_registry::{MigrationRegistry, MigrationStep};
use crate::traversal::{traverse_document, NodeVisitors};
use serde_json::{json, Map, Value};

/// Register all section container migrations
pub fn register_migrations(registry: &mut MigrationRegistry) {
    registry.register_step(MigrationStep::new(
        2,
        "add card view multilevel flag",
        migrate_to_v2,
    ));
}

/// Add `multilevel: false` to every card view state that lacks it
///
/// **Before:**
/// ```json
/// { "type": "collection/section-container/card", "state": { "perRow": 2, "gap": 16 } }
/// ```
///
/// **After:**
/// ```json
/// { "type": "collection/section-container/card", "state": { "perRow": 2, "gap": 16, "multilevel": false } }
/// ```
pub fn migrate_to_v2(document: Value) -> Value {
    traverse_document(
        document,
        &NodeVisitors {
            section_container: Some(add_card_multilevel),
            ..Default::default()
        },
    )
}

fn add_card_multilevel(container: &mut Map<String, Value>) {
    let Some(views) = container.get_mut("view").and_then(Value::as_array_mut) else {
        return;
    };
    for view in views.iter_mut().filter_map(Value::as_object_mut) {
        if view.get("type").and_then(Value::as_str) != Some(SECTION_CONTAINER_CARD_VIEW) {
            continue;
        }
        if let Some(Value::Object(state)) = view.get_mut("state") {
            state.entry("multilevel").or_insert(json!(false));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_card(state: Value) -> Value {
        json!({
            "content": {
                "type": "section-container",
                "view": [
                    { "type": "collection/section-container/default" },
                    { "type": "collection/section-container/card", "state": state }
                ],
                "children": [{
                    "type": "section",
                    "view": [],
                    "children": [{
                        "type": "section-container",
                        "view": [
                            { "type": "collection/section-container/card", "state": { "perRow": 3, "gap": 8 } }
                        ],
                        "children": []
                    }],
                    "summary": []
                }]
            }
        })
    }

    #[test]
    fn test_v2_adds_multilevel_at_every_depth() {
        let migrated = migrate_to_v2(doc_with_card(json!({ "perRow": 2, "gap": 16 })));

        assert_eq!(migrated["content"]["view"][1]["state"]["multilevel"], false);
        let nested = &migrated["content"]["children"][0]["children"][0]["view"][0]["state"];
        assert_eq!(nested["multilevel"], false);
        assert_eq!(nested["perRow"], 3);
    }

    #[test]
    fn test_v2_keeps_existing_flag() {
        let migrated = migrate_to_v2(doc_with_card(json!({ "perRow": 2, "gap": 16, "multilevel": true })));
        assert_eq!(migrated["content"]["view"][1]["state"]["multilevel"], true);
    }

    #[test]
    fn test_v2_leaves_other_views_alone() {
        let migrated = migrate_to_v2(doc_with_card(json!({ "perRow": 2, "gap": 16 })));
        assert!(migrated["content"]["view"][0].get("state").is_none());
    }
}
