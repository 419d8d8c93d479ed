//! Document root and invariant validation
//!
//! A [`Document`] wraps one content tree together with its title, slug,
//! schema version and ephemeral editing state. Structural edits mutate
//! `content` in place; [`Document::validate`] re-checks the tree invariants
//! after the fact.

use crate::models::collection::{NoHeadingContent, Section, SectionContainer};
use crate::models::content::{new_node_id, ContentParagraph};
use crate::models::view::{
    has_canonical_shape, SectionContainerView, SectionView, UntitledSectionView,
    SECTION_CONTAINER_DEFAULT_VIEW, SECTION_DEFAULT_VIEW, UNTITLED_SECTION_DEFAULT_VIEW,
};
use crate::traversal::{walk, NodeRef};
use crate::utils::markdown::slugify;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Schema version written by this build
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

const SECTION_VIEWS: [&str; 3] = [
    SECTION_DEFAULT_VIEW,
    "collection/section/static",
    "collection/section/page",
];

const SECTION_CONTAINER_VIEWS: [&str; 7] = [
    SECTION_CONTAINER_DEFAULT_VIEW,
    "collection/section-container/static",
    "collection/section-container/card",
    "collection/section-container/brick",
    "collection/section-container/table-of-contents",
    "collection/section-container/sidebar",
    "collection/section-container/tabs",
];

const UNTITLED_SECTION_VIEWS: [&str; 2] = [UNTITLED_SECTION_DEFAULT_VIEW, "static"];

/// Tree invariant violations reported by [`Document::validate`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Section {section_id} has non-positive heading level")]
    NonPositiveLevel { section_id: String },

    #[error("Section {section_id} at level {level} is not deeper than its ancestor at level {ancestor_level}")]
    LevelNotDeeper {
        section_id: String,
        level: u32,
        ancestor_level: u32,
    },

    #[error("Node {node_id} has malformed view list: {reason}")]
    MalformedView { node_id: String, reason: String },
}

impl ValidationError {
    pub fn malformed_view(node_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedView {
            node_id: node_id.into(),
            reason: reason.into(),
        }
    }
}

/// Editing mode of the surface showing the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Write,
    Customize,
    Read,
}

/// Ephemeral editing state persisted alongside the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentState {
    #[serde(default)]
    pub mode: EditMode,
    /// Read and cleared by the rendering surface
    #[serde(rename = "animateNextChange", default)]
    pub animate_next_change: bool,
    #[serde(
        rename = "focusedContentId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub focused_content_id: Option<String>,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self {
            mode: EditMode::Write,
            animate_next_change: true,
            focused_content_id: None,
        }
    }
}

/// Root wrapper of one content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "document")]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    /// Schema version; a missing field reads as 0
    #[serde(default)]
    pub version: u32,
    pub content: NoHeadingContent,
    #[serde(default)]
    pub state: DocumentState,
}

impl Document {
    /// Create a document at the current schema version
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quire_core::models::{Document, NoHeadingContent, ContentParagraph, CURRENT_SCHEMA_VERSION};
    /// # use chrono::Utc;
    /// let now = Utc::now();
    /// let doc = Document::new(
    ///     "My **First** Notes",
    ///     NoHeadingContent::Paragraph(ContentParagraph::new("hello", now)),
    ///     now,
    /// );
    /// assert_eq!(doc.slug, "my-first-notes");
    /// assert_eq!(doc.version, CURRENT_SCHEMA_VERSION);
    /// ```
    pub fn new(title: impl Into<String>, content: NoHeadingContent, now: DateTime<Utc>) -> Self {
        let title = title.into();
        Self {
            id: new_node_id(),
            slug: slugify(&title),
            title,
            created: now,
            last_modified: now,
            version: CURRENT_SCHEMA_VERSION,
            content,
            state: DocumentState::default(),
        }
    }

    /// Create a document holding a single empty paragraph
    pub fn blank(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(
            title,
            NoHeadingContent::Paragraph(ContentParagraph::new("", now)),
            now,
        )
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_modified = now;
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.content.contains_id(id)
    }

    pub fn find_section(&self, id: &str) -> Option<&Section> {
        self.content.find_section(id)
    }

    pub fn find_section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.content.find_section_mut(id)
    }

    pub fn find_container(&self, id: &str) -> Option<&SectionContainer> {
        self.content.find_container(id)
    }

    pub fn find_container_mut(&mut self, id: &str) -> Option<&mut SectionContainer> {
        self.content.find_container_mut(id)
    }

    pub fn find_paragraph(&self, id: &str) -> Option<&ContentParagraph> {
        self.content.find_paragraph(id)
    }

    /// Every node id in document order, headings included
    pub fn node_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        walk(&self.content, &mut |node: NodeRef<'_>, _: &[NodeRef<'_>]| {
            ids.push(node.id().to_string())
        });
        ids
    }

    /// Detach a section anywhere below the root
    pub fn remove_section(&mut self, id: &str, now: DateTime<Utc>) -> Option<Section> {
        self.content.remove_section(id, now)
    }

    /// Check the tree invariants
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in document order:
    /// - a node id used twice
    /// - a heading level of 0
    /// - a section not strictly deeper than the nearest enclosing section
    /// - a view list that is not the canonical variant list for its node type,
    ///   or an `activeView` naming no listed variant
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        validate_node(&self.content, None, &mut seen)
    }
}

fn claim_id(id: &str, seen: &mut HashSet<String>) -> Result<(), ValidationError> {
    if !seen.insert(id.to_string()) {
        return Err(ValidationError::DuplicateId(id.to_string()));
    }
    Ok(())
}

fn validate_node(
    node: &NoHeadingContent,
    ancestor_level: Option<u32>,
    seen: &mut HashSet<String>,
) -> Result<(), ValidationError> {
    match node {
        NoHeadingContent::Paragraph(p) => claim_id(&p.id, seen),
        NoHeadingContent::Section(s) => validate_section(s, ancestor_level, seen),
        NoHeadingContent::UntitledSection(u) => {
            claim_id(&u.id, seen)?;
            if !has_canonical_shape(
                u.view.iter().map(UntitledSectionView::type_name),
                &UNTITLED_SECTION_VIEWS,
            ) {
                return Err(ValidationError::malformed_view(&u.id, "untitled section views out of order"));
            }
            check_active_view(&u.id, &u.active_view, &UNTITLED_SECTION_VIEWS)?;
            for child in &u.children {
                validate_node(child, ancestor_level, seen)?;
            }
            Ok(())
        }
        NoHeadingContent::SectionContainer(c) => {
            claim_id(&c.id, seen)?;
            if !has_canonical_shape(
                c.view.iter().map(SectionContainerView::type_name),
                &SECTION_CONTAINER_VIEWS,
            ) {
                return Err(ValidationError::malformed_view(&c.id, "expected the seven container views"));
            }
            check_active_view(&c.id, &c.active_view, &SECTION_CONTAINER_VIEWS)?;
            for section in &c.children {
                validate_section(section, ancestor_level, seen)?;
            }
            Ok(())
        }
    }
}

fn validate_section(
    section: &Section,
    ancestor_level: Option<u32>,
    seen: &mut HashSet<String>,
) -> Result<(), ValidationError> {
    claim_id(&section.id, seen)?;
    claim_id(&section.heading.id, seen)?;

    let level = section.heading.level;
    if level == 0 {
        return Err(ValidationError::NonPositiveLevel {
            section_id: section.id.clone(),
        });
    }
    if let Some(ancestor_level) = ancestor_level {
        if level <= ancestor_level {
            return Err(ValidationError::LevelNotDeeper {
                section_id: section.id.clone(),
                level,
                ancestor_level,
            });
        }
    }

    if !has_canonical_shape(section.view.iter().map(SectionView::type_name), &SECTION_VIEWS) {
        return Err(ValidationError::malformed_view(&section.id, "expected default, static, page"));
    }
    check_active_view(&section.id, &section.active_view, &SECTION_VIEWS)?;

    for child in section.children.iter().chain(section.summary.iter()) {
        validate_node(child, Some(level), seen)?;
    }
    Ok(())
}

fn check_active_view(node_id: &str, active_view: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if allowed.contains(&active_view) {
        Ok(())
    } else {
        Err(ValidationError::malformed_view(
            node_id,
            format!("activeView {} is not a listed variant", active_view),
        ))
    }
}
