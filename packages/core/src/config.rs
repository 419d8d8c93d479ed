//! Editor configuration
//!
//! Placeholder text and container view defaults used whenever the core
//! creates nodes on the user's behalf, plus debugging switches for the
//! editor service. All fields default so partial JSON files load.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for card `perRow`
const MAX_CARD_PER_ROW: u8 = 4;
/// Upper bound for card `gap`
const MAX_CARD_GAP: u16 = 36;
/// Upper bound for tabs `gap`
const MAX_TABS_GAP: u16 = 72;

/// Text placed into freshly created nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    pub heading: String,
    pub summary: String,
    pub first_paragraph: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            heading: "New Section".to_string(),
            summary: "New Section's summary".to_string(),
            first_paragraph: "New Section's first paragraph".to_string(),
        }
    }
}

/// View state given to every new section container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerDefaults {
    pub card_per_row: u8,
    pub card_gap: u16,
    pub sidebar_percentage_width: u8,
    pub tabs_gap: u16,
}

impl Default for ContainerDefaults {
    fn default() -> Self {
        Self {
            card_per_row: 2,
            card_gap: 16,
            sidebar_percentage_width: 30,
            tabs_gap: 16,
        }
    }
}

/// Configuration for [`crate::services::EditorService`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub placeholders: Placeholders,
    pub container: ContainerDefaults,
    /// Run `Document::validate` after every successful edit and log violations
    pub validate_after_edit: bool,
}

impl EditorConfig {
    /// Parse configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, String> {
        let config: EditorConfig =
            serde_json::from_str(text).map_err(|e| format!("invalid editor config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        Self::from_json_str(&text)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let container = &self.container;

        if container.card_per_row == 0 || container.card_per_row > MAX_CARD_PER_ROW {
            return Err(format!(
                "container.card_per_row must be between 1 and {}",
                MAX_CARD_PER_ROW
            ));
        }

        if container.card_gap > MAX_CARD_GAP {
            return Err(format!("container.card_gap cannot exceed {}", MAX_CARD_GAP));
        }

        if container.tabs_gap > MAX_TABS_GAP {
            return Err(format!("container.tabs_gap cannot exceed {}", MAX_TABS_GAP));
        }

        if container.sidebar_percentage_width > 100 {
            return Err("container.sidebar_percentage_width cannot exceed 100".to_string());
        }

        Ok(())
    }
}
