//! Leaf content: paragraphs and headings

use crate::models::view::{HeadingView, ParagraphView, HEADING_DEFAULT_VIEW, PARAGRAPH_DEFAULT_VIEW};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh node id
pub fn new_node_id() -> String {
    Uuid::new_v4().to_string()
}

/// A paragraph of text or inline markup
///
/// The `type` discriminant is written by [`crate::models::NoHeadingContent`],
/// which is the only place a paragraph appears in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentParagraph {
    pub id: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub content: String,
    pub view: Vec<ParagraphView>,
    #[serde(rename = "activeView")]
    pub active_view: String,
}

impl ContentParagraph {
    /// Create a paragraph with a fresh id and the default view
    pub fn new(content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: new_node_id(),
            created: now,
            last_modified: now,
            content: content.into(),
            view: vec![ParagraphView::Default],
            active_view: PARAGRAPH_DEFAULT_VIEW.to_string(),
        }
    }

    /// Create a paragraph that shares `template`'s view and active view
    pub fn styled_like(template: &ContentParagraph, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: new_node_id(),
            created: now,
            last_modified: now,
            content: content.into(),
            view: template.view.clone(),
            active_view: template.active_view.clone(),
        }
    }
}

/// Heading owned by exactly one [`crate::models::Section`]
///
/// `level` is the section's nesting depth; it starts at 1 and has no upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "heading")]
pub struct ContentHeading {
    pub id: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub content: String,
    pub level: u32,
    pub view: Vec<HeadingView>,
    #[serde(rename = "activeView")]
    pub active_view: String,
}

impl ContentHeading {
    pub fn new(content: impl Into<String>, level: u32, now: DateTime<Utc>) -> Self {
        Self::with_id(new_node_id(), content, level, now, now)
    }

    /// Build a heading that keeps an existing node's identity
    pub fn with_id(
        id: String,
        content: impl Into<String>,
        level: u32,
        created: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            created,
            last_modified: now,
            content: content.into(),
            level,
            view: vec![HeadingView::Default],
            active_view: HEADING_DEFAULT_VIEW.to_string(),
        }
    }
}
