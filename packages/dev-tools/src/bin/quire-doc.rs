//! Document Maintenance Binary
//!
//! Command-line access to the storage-read path for documents kept as JSON
//! files: upgrade them to the current schema, check their tree invariants,
//! export them as markdown or create new ones.
//!
//! # Usage
//!
//! ```bash
//! # Print the migrated JSON
//! cargo run --bin quire-doc -- migrate notes.json
//!
//! # Rewrite the file in place
//! cargo run --bin quire-doc -- migrate notes.json --write
//!
//! # Non-zero exit when the tree breaks an invariant
//! cargo run --bin quire-doc -- validate notes.json
//!
//! # Markdown export
//! cargo run --bin quire-doc -- export notes.json
//!
//! # New document with one placeholder section
//! cargo run --bin quire-doc -- --config editor.json new "Field Notes" --out notes.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use quire_core::config::EditorConfig;
use quire_core::models::{Document, NoHeadingContent};
use quire_core::operations::create_section_container;
use quire_core::services::migration_registry::document_version;
use quire_core::services::{EditorService, MigrationRegistry};
use quire_core::utils::content_to_markdown;
use serde_json::Value;

/// Quire document tool - migrate, validate and export stored documents
#[derive(Parser, Debug)]
#[command(name = "quire-doc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Editor configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upgrade a document to the current schema version
    Migrate {
        /// Document JSON file
        file: PathBuf,

        /// Rewrite the file instead of printing the result
        #[arg(short, long)]
        write: bool,
    },

    /// Migrate, then check the tree invariants
    Validate {
        /// Document JSON file
        file: PathBuf,
    },

    /// Migrate, then print the document as markdown
    Export {
        /// Document JSON file
        file: PathBuf,
    },

    /// Create a document holding one placeholder section
    New {
        /// Document title
        title: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EditorConfig::from_json_file(path).map_err(|e| anyhow!(e))?,
        None => EditorConfig::default(),
    };
    let registry = MigrationRegistry::with_builtin_steps();

    match cli.command {
        Command::Migrate { file, write } => {
            let stored = read_json(&file).await?;
            let from = document_version(&stored);
            let migrated = registry.migrate_value(stored);
            let to = document_version(&migrated);

            if write {
                if to > from {
                    write_json(&file, &migrated).await?;
                    tracing::info!("Migrated {} from v{} to v{}", file.display(), from, to);
                } else {
                    tracing::info!("{} is already at v{}", file.display(), from);
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&migrated)?);
            }
        }
        Command::Validate { file } => {
            let document = load_document(&registry, &file).await?;
            document
                .validate()
                .with_context(|| format!("{} breaks a tree invariant", file.display()))?;
            tracing::info!(
                "{} is valid ({} nodes, schema v{})",
                file.display(),
                document.node_ids().len(),
                document.version
            );
        }
        Command::Export { file } => {
            let document = load_document(&registry, &file).await?;
            print!("{}", content_to_markdown(&document.content));
        }
        Command::New { title, out } => {
            let editor = EditorService::with_system_clock(config);
            let document = new_document(&editor, &title)?;
            let value = serde_json::to_value(&document)?;

            match out {
                Some(path) => {
                    write_json(&path, &value).await?;
                    tracing::info!("Created {} ({})", path.display(), document.id);
                }
                None => println!("{}", serde_json::to_string_pretty(&value)?),
            }
        }
    }

    Ok(())
}

fn new_document(editor: &EditorService, title: &str) -> anyhow::Result<Document> {
    let now = chrono::Utc::now();
    let container = create_section_container(&editor.config().container, now);
    let container_id = container.id.clone();
    let mut document = Document::new(title, NoHeadingContent::SectionContainer(container), now);
    editor.add_section(&mut document, &container_id, 1)?;
    Ok(document)
}

async fn load_document(registry: &MigrationRegistry, path: &Path) -> anyhow::Result<Document> {
    let stored = read_json(path).await?;
    registry
        .migrate_document(stored)
        .with_context(|| format!("{} is not a Quire document", path.display()))
}

async fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

async fn write_json(path: &Path, value: &Value) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, text)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
