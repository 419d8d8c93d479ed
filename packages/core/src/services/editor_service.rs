//! Editor Service
//!
//! Document-level façade over the structural edits in [`crate::operations`].
//! Each method resolves its target by id inside a `&mut Document`, takes one
//! timestamp from the service clock and passes it to the operation, then
//! updates the document's editing state:
//!
//! - `animateNextChange` is cleared before the edit (read mode toggling sets
//!   it again afterwards)
//! - the document's `last_modified` is stamped when its tree changed
//! - with `validate_after_edit` on, the tree is re-validated and violations
//!   are logged at `warn`
//!
//! Edits return focus requests instead of touching the rendering surface;
//! [`EditorService::dispatch_focus`] delivers them once the caller has
//! finished applying the edit.
//!
//! # Examples
//!
//! ```rust
//! use quire_core::config::EditorConfig;
//! use quire_core::models::time::SystemTimeProvider;
//! use quire_core::models::{Document, NoHeadingContent};
//! use quire_core::operations::create_section_container;
//! use quire_core::services::EditorService;
//! use chrono::Utc;
//! use std::sync::Arc;
//!
//! let editor = EditorService::new(EditorConfig::default(), Arc::new(SystemTimeProvider));
//! let container = create_section_container(&editor.config().container, Utc::now());
//! let container_id = container.id.clone();
//! let mut doc = Document::new("Notes", NoHeadingContent::SectionContainer(container), Utc::now());
//!
//! let first = editor.add_section(&mut doc, &container_id, 1).unwrap();
//! let second = editor.add_section(&mut doc, &container_id, 1).unwrap();
//! let change = editor.increase_level(&mut doc, &second).unwrap();
//!
//! assert_eq!(change.new_level, 2);
//! assert_eq!(change.parent_id.as_deref(), Some(first.as_str()));
//! ```

use crate::config::EditorConfig;
use crate::models::time::{SystemTimeProvider, TimeProvider};
use crate::models::{ContentSlot, DisplayState, Document, Section};
use crate::operations::{
    self, AncestorLookup, EditError, FocusRequest, FocusSurface, LevelChange, SectionLookup,
};
use crate::services::error::DocumentServiceError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// Applies structural edits to documents
#[derive(Clone)]
pub struct EditorService {
    config: EditorConfig,
    clock: Arc<dyn TimeProvider>,
}

impl EditorService {
    pub fn new(config: EditorConfig, clock: Arc<dyn TimeProvider>) -> Self {
        Self { config, clock }
    }

    /// Editor using the system clock
    pub fn with_system_clock(config: EditorConfig) -> Self {
        Self::new(config, Arc::new(SystemTimeProvider))
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Split a paragraph of section `section_id` at `index` of `slot`
    pub fn split_paragraph(
        &self,
        document: &mut Document,
        section_id: &str,
        slot: ContentSlot,
        before: &str,
        after: &str,
        index: usize,
    ) -> Result<FocusRequest, DocumentServiceError> {
        let now = self.begin(document);
        let request = operations::split_paragraph(
            section_mut(document, section_id)?,
            slot,
            before,
            after,
            index,
            now,
        )?;
        self.finish(document, now);
        Ok(request)
    }

    /// Join the paragraph at `index` of `slot` onto `previous_id`
    pub fn join_with_previous_paragraph(
        &self,
        document: &mut Document,
        section_id: &str,
        slot: ContentSlot,
        index: usize,
        previous_id: &str,
    ) -> Result<FocusRequest, DocumentServiceError> {
        let now = self.begin(document);
        let request = operations::join_with_previous_paragraph(
            section_mut(document, section_id)?,
            slot,
            index,
            previous_id,
            now,
        )?;
        self.finish(document, now);
        Ok(request)
    }

    /// Split section `section_id` at `paragraph_id`
    ///
    /// The new section is placed right after the original, in the same array.
    /// Returns the new section's id.
    ///
    /// # Errors
    ///
    /// `RootNotDetachable` when `section_id` is the document root, which has
    /// no array to hold a sibling.
    pub fn split_section(
        &self,
        document: &mut Document,
        section_id: &str,
        paragraph_id: &str,
    ) -> Result<String, DocumentServiceError> {
        if document.content.id() == section_id {
            return Err(EditError::root_not_detachable(section_id).into());
        }

        let now = self.begin(document);
        let mut created = None;
        let created_id = operations::split_section(
            section_mut(document, section_id)?,
            paragraph_id,
            &self.config.placeholders,
            now,
            |section| created = Some(section),
        )?;

        if let Some(section) = created {
            if document
                .content
                .insert_section_after(section_id, section, now)
                .is_err()
            {
                return Err(EditError::lookup_failed(section_id, "owning array").into());
            }
        }
        self.finish(document, now);
        Ok(created_id)
    }

    /// Enter at the end of the heading of `section_id`
    pub fn insert_paragraph_after_heading(
        &self,
        document: &mut Document,
        section_id: &str,
    ) -> Result<FocusRequest, DocumentServiceError> {
        let now = self.begin(document);
        let request = operations::insert_paragraph_after_heading(section_mut(document, section_id)?, now)?;
        self.finish(document, now);
        Ok(request)
    }

    /// Toggle the read mode of `section_id` and request an animated redraw
    pub fn toggle_read_mode(
        &self,
        document: &mut Document,
        section_id: &str,
    ) -> Result<DisplayState, DocumentServiceError> {
        let now = self.begin(document);
        let state = operations::toggle_read_mode(section_mut(document, section_id)?, now)?;
        document.state.animate_next_change = true;
        self.finish(document, now);
        Ok(state)
    }

    /// Append a placeholder section at `level` to container `container_id`
    pub fn add_section(
        &self,
        document: &mut Document,
        container_id: &str,
        level: u32,
    ) -> Result<String, DocumentServiceError> {
        let now = self.begin(document);
        let document_id = document.id.clone();
        let container = document
            .find_container_mut(container_id)
            .ok_or_else(|| DocumentServiceError::node_not_found(document_id, container_id))?;
        let id = operations::add_section(container, level, &self.config.placeholders, now);
        self.finish(document, now);
        Ok(id)
    }

    /// Nest `section_id` under its preceding peer
    pub fn increase_level(
        &self,
        document: &mut Document,
        section_id: &str,
    ) -> Result<LevelChange, DocumentServiceError> {
        self.increase_level_with(document, section_id, &mut AncestorLookup::new())
    }

    /// Nest `section_id` under its preceding peer, placed by `lookup`
    pub fn increase_level_with(
        &self,
        document: &mut Document,
        section_id: &str,
        lookup: &mut dyn SectionLookup,
    ) -> Result<LevelChange, DocumentServiceError> {
        let now = self.begin(document);
        let change = operations::increase_level(
            &mut document.content,
            section_id,
            lookup,
            &self.config.container,
            now,
        )?;
        self.finish(document, now);
        Ok(change)
    }

    /// Move `section_id` up one level
    pub fn decrease_level(
        &self,
        document: &mut Document,
        section_id: &str,
    ) -> Result<LevelChange, DocumentServiceError> {
        self.decrease_level_with(document, section_id, &mut AncestorLookup::new())
    }

    /// Move `section_id` up one level, placed by `lookup`
    pub fn decrease_level_with(
        &self,
        document: &mut Document,
        section_id: &str,
        lookup: &mut dyn SectionLookup,
    ) -> Result<LevelChange, DocumentServiceError> {
        let now = self.begin(document);
        let change = operations::decrease_level(
            &mut document.content,
            section_id,
            lookup,
            &self.config.container,
            now,
        )?;
        self.finish(document, now);
        Ok(change)
    }

    /// Deliver a focus request produced by an edit
    ///
    /// Requests for nodes the surface has not mounted are dropped. Returns
    /// whether the surface took focus.
    pub fn dispatch_focus(
        &self,
        document: &mut Document,
        request: FocusRequest,
        surface: &mut dyn FocusSurface,
    ) -> bool {
        if !surface.is_mounted(&request.node_id) {
            debug!(node_id = %request.node_id, "focus target not mounted, dropping request");
            return false;
        }
        document.state.focused_content_id = Some(request.node_id.clone());
        surface.focus(&request.node_id, request.cursor)
    }

    fn begin(&self, document: &mut Document) -> DateTime<Utc> {
        document.state.animate_next_change = false;
        self.clock.now()
    }

    fn finish(&self, document: &mut Document, now: DateTime<Utc>) {
        document.touch(now);
        if self.config.validate_after_edit {
            if let Err(violation) = document.validate() {
                warn!(document_id = %document.id, %violation, "edit left the tree invalid");
            }
        }
    }
}

fn section_mut<'a>(
    document: &'a mut Document,
    section_id: &str,
) -> Result<&'a mut Section, DocumentServiceError> {
    let document_id = document.id.clone();
    document
        .find_section_mut(section_id)
        .ok_or_else(|| DocumentServiceError::node_not_found(document_id, section_id))
}
