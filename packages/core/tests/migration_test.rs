//! Integration tests for the schema migration engine
//!
//! Tests cover:
//! - Upgrading a version-0 document through every built-in step
//! - Idempotence of the storage-read entry point
//! - Partial chains for documents already part-way upgraded
//! - Decoding of the migrated document into the typed model
//! - Lossless re-encoding of the decoded document

use anyhow::Result;
use quire_core::models::{DisplayState, Document, CURRENT_SCHEMA_VERSION};
use quire_core::services::migration_registry::document_version;
use quire_core::services::migrations::{section, section_container};
use quire_core::services::{migrate_document_if_needed, MigrationRegistry};
use serde_json::{json, Value};

fn legacy() -> Result<Value> {
    Ok(serde_json::from_str(include_str!("fixtures/legacy_v0.json"))?)
}

fn trip_state(doc: &Value) -> &Value {
    &doc["content"]["children"][0]["view"][0]["state"]
}

fn day_one_state(doc: &Value) -> &Value {
    &doc["content"]["children"][0]["children"][1]["children"][0]["view"][0]["state"]
}

#[test]
fn test_version_zero_document_reaches_current_version() -> Result<()> {
    let registry = MigrationRegistry::with_builtin_steps();
    let migrated = registry.migrate_value(legacy()?);

    assert_eq!(document_version(&migrated), CURRENT_SCHEMA_VERSION);
    assert_eq!(
        trip_state(&migrated),
        &json!({ "state": "expanded", "variation": "default", "animation": "none" })
    );
    assert_eq!(
        day_one_state(&migrated),
        &json!({ "state": "summary", "variation": "default", "animation": "none" })
    );
    assert_eq!(migrated["content"]["view"][2]["state"]["multilevel"], false);
    assert_eq!(
        migrated["content"]["children"][0]["children"][1]["view"][2]["state"]["multilevel"],
        false
    );
    Ok(())
}

#[test]
fn test_migration_is_idempotent() -> Result<()> {
    let registry = MigrationRegistry::with_builtin_steps();
    let once = migrate_document_if_needed(&registry, legacy()?);
    let twice = migrate_document_if_needed(&registry, once.clone());

    assert_eq!(once, twice);

    // Re-running the raw steps on an upgraded document changes nothing either
    let replayed = section::migrate_to_v3(section_container::migrate_to_v2(section::migrate_to_v1(
        once.clone(),
    )));
    assert_eq!(replayed, once);
    Ok(())
}

#[test]
fn test_partially_upgraded_document_runs_remaining_steps() -> Result<()> {
    let mut doc = legacy()?;
    doc["version"] = json!(2);
    // At v2 the display state is already structured
    doc["content"]["children"][0]["view"][0]["state"] = json!({ "state": "expanded", "variation": "wide" });

    let migrated = MigrationRegistry::with_builtin_steps().migrate_value(doc);

    assert_eq!(migrated["version"], 3);
    assert_eq!(trip_state(&migrated)["variation"], "wide");
    assert_eq!(trip_state(&migrated)["animation"], "none");
    // Step 2 was skipped, so the card state was not touched
    assert!(migrated["content"]["view"][2]["state"].get("multilevel").is_none());
    Ok(())
}

#[test]
fn test_migrated_document_decodes_and_validates() -> Result<()> {
    let doc = MigrationRegistry::with_builtin_steps().migrate_document(legacy()?)?;

    assert_eq!(doc.version, CURRENT_SCHEMA_VERSION);
    doc.validate()?;

    let trip = doc.find_section("s-trip").expect("trip section");
    assert_eq!(trip.active_display_state(), Some(DisplayState::Expanded));
    let gear = doc.find_section("s-gear").expect("gear section");
    assert_eq!(gear.active_display_state(), Some(DisplayState::Collapsed));
    assert_eq!(doc.find_section("s-day1").map(|s| s.level()), Some(2));
    Ok(())
}

#[test]
fn test_decoded_document_reencodes_to_migrated_blob() -> Result<()> {
    let migrated = MigrationRegistry::with_builtin_steps().migrate_value(legacy()?);
    let doc: Document = serde_json::from_value(migrated.clone())?;

    let reencoded = serde_json::to_value(&doc)?;
    assert_eq!(reencoded["content"]["children"][0]["type"], "section");
    assert_eq!(
        reencoded["content"]["children"][0]["children"][1]["children"][0]["type"],
        "section"
    );
    assert_eq!(reencoded, migrated);
    Ok(())
}

#[test]
fn test_newer_document_passes_through() -> Result<()> {
    let mut doc = legacy()?;
    doc["version"] = json!(CURRENT_SCHEMA_VERSION + 1);

    let migrated = migrate_document_if_needed(&MigrationRegistry::with_builtin_steps(), doc.clone());
    assert_eq!(migrated, doc);
    Ok(())
}
