//! Section Structural Editing
//!
//! Edits that work on a single section: cleaving it in two at a paragraph,
//! Enter at the end of its heading, and read-mode toggling of its default
//! view.

use crate::config::Placeholders;
use crate::models::view::SECTION_DEFAULT_VIEW;
use crate::models::{
    ContentHeading, ContentParagraph, ContentSlot, DisplayState, NoHeadingContent, NodeKind, Section,
};
use crate::operations::error::{EditError, EditResult};
use crate::operations::focus::FocusRequest;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Create an empty paragraph for a section summary
pub fn create_summary_paragraph(now: DateTime<Utc>) -> ContentParagraph {
    ContentParagraph::new("", now)
}

/// Cleave `section` at the paragraph `paragraph_id`
///
/// The paragraph becomes the heading of a new section at the same level,
/// keeping the paragraph's id, creation time and text. Everything after it in
/// `section.children` moves to the new section; the original keeps what came
/// before. The new section gets a placeholder summary and is handed to
/// `attach`, which decides where it lives. Returns the new section's id.
///
/// # Errors
///
/// `NodeNotFound` / `WrongNodeType` when `paragraph_id` is not a paragraph in
/// `section.children`. `attach` is not called in that case.
///
/// # Examples
///
/// ```rust
/// # use quire_core::config::Placeholders;
/// # use quire_core::models::{ContentHeading, ContentParagraph, NoHeadingContent, Section};
/// # use quire_core::operations::split_section;
/// # use chrono::Utc;
/// let now = Utc::now();
/// let mut section = Section::new(ContentHeading::new("Intro", 1, now), now);
/// let pivot = ContentParagraph::new("Details", now);
/// let pivot_id = pivot.id.clone();
/// section.children.push(NoHeadingContent::Paragraph(ContentParagraph::new("lead", now)));
/// section.children.push(NoHeadingContent::Paragraph(pivot));
///
/// let mut attached = None;
/// split_section(&mut section, &pivot_id, &Placeholders::default(), now, |s| attached = Some(s)).unwrap();
///
/// let attached = attached.unwrap();
/// assert_eq!(attached.heading.id, pivot_id);
/// assert_eq!(attached.heading.content, "Details");
/// assert_eq!(section.children.len(), 1);
/// ```
pub fn split_section<F>(
    section: &mut Section,
    paragraph_id: &str,
    placeholders: &Placeholders,
    now: DateTime<Utc>,
    attach: F,
) -> EditResult<String>
where
    F: FnOnce(Section),
{
    let index = section
        .children
        .iter()
        .position(|n| n.id() == paragraph_id)
        .ok_or_else(|| EditError::node_not_found(paragraph_id))?;
    let pivot = section.children[index]
        .as_paragraph()
        .ok_or_else(|| {
            EditError::wrong_node_type(paragraph_id, NodeKind::Paragraph, section.children[index].kind())
        })?;

    let heading = ContentHeading::with_id(
        pivot.id.clone(),
        pivot.content.clone(),
        section.level(),
        pivot.created,
        now,
    );

    let mut tail = section.children.split_off(index);
    tail.remove(0);
    section.last_modified = now;

    let mut created = Section::new(heading, now);
    created.summary.push(NoHeadingContent::Paragraph(ContentParagraph::new(
        &placeholders.summary,
        now,
    )));
    created.children = tail;
    let created_id = created.id.clone();

    debug!(section_id = %section.id, new_section_id = %created_id, paragraph_id, "split section");
    attach(created);
    Ok(created_id)
}

/// Enter at the end of the heading: open an empty paragraph below it
///
/// Expanded sections get the paragraph at the start of `children`, sections
/// showing their summary at the start of `summary`.
///
/// # Errors
///
/// `ViewRejected` when the default view is not active or the section is
/// collapsed.
pub fn insert_paragraph_after_heading(section: &mut Section, now: DateTime<Utc>) -> EditResult<FocusRequest> {
    let slot = match section.active_display_state() {
        Some(DisplayState::Expanded) => ContentSlot::Children,
        Some(DisplayState::Summary) => ContentSlot::Summary,
        Some(DisplayState::Collapsed) => {
            return Err(EditError::view_rejected(&section.id, "section is collapsed"))
        }
        None => {
            return Err(EditError::view_rejected(
                &section.id,
                format!("active view is {}", section.active_view),
            ))
        }
    };

    let paragraph = ContentParagraph::new("", now);
    let id = paragraph.id.clone();
    section.slot_mut(slot).insert(0, NoHeadingContent::Paragraph(paragraph));
    section.last_modified = now;

    debug!(section_id = %section.id, ?slot, "inserted paragraph after heading");
    Ok(FocusRequest::start(id))
}

/// Flip the default view between expanded and summary; collapsed opens up
///
/// Returns the new display state.
///
/// # Errors
///
/// `ViewRejected` when the section carries no default view.
pub fn toggle_read_mode(section: &mut Section, now: DateTime<Utc>) -> EditResult<DisplayState> {
    let section_id = section.id.clone();
    let display = section
        .display_mut()
        .ok_or_else(|| EditError::view_rejected(&section_id, format!("missing {}", SECTION_DEFAULT_VIEW)))?;

    display.state = match display.state {
        DisplayState::Expanded => DisplayState::Summary,
        DisplayState::Summary | DisplayState::Collapsed => DisplayState::Expanded,
    };
    let state = display.state;
    section.last_modified = now;

    debug!(section_id = %section_id, state = state.as_str(), "toggled read mode");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::view::SectionView;

    fn ts() -> DateTime<Utc> {
        "2025-02-23T01:04:00Z".parse().unwrap()
    }

    fn later() -> DateTime<Utc> {
        "2025-02-23T05:00:00Z".parse().unwrap()
    }

    fn paragraph(id: &str, text: &str) -> NoHeadingContent {
        let mut p = ContentParagraph::new(text, ts());
        p.id = id.to_string();
        NoHeadingContent::Paragraph(p)
    }

    fn section_with(level: u32, children: Vec<NoHeadingContent>) -> Section {
        let mut s = Section::new(ContentHeading::new("Original", level, ts()), ts());
        s.children = children;
        s
    }

    #[test]
    fn test_split_section_moves_suffix() {
        let mut s = section_with(
            2,
            vec![paragraph("p1", "one"), paragraph("p2", "Two"), paragraph("p3", "three")],
        );

        let mut attached = Vec::new();
        let id = split_section(&mut s, "p2", &Placeholders::default(), later(), |n| attached.push(n)).unwrap();

        assert_eq!(attached.len(), 1);
        let created = &attached[0];
        assert_eq!(created.id, id);
        assert_eq!(created.heading.id, "p2");
        assert_eq!(created.heading.content, "Two");
        assert_eq!(created.heading.level, 2);
        assert_eq!(created.heading.created, ts());
        assert_eq!(created.heading.last_modified, later());
        assert_eq!(created.children.len(), 1);
        assert_eq!(created.children[0].id(), "p3");
        assert_eq!(
            created.summary[0].as_paragraph().unwrap().content,
            "New Section's summary"
        );
        assert_eq!(created.active_display_state(), Some(DisplayState::Expanded));

        assert_eq!(s.children.len(), 1);
        assert_eq!(s.children[0].id(), "p1");
        assert_eq!(s.last_modified, later());
    }

    #[test]
    fn test_split_section_failures_skip_callback() {
        let nested = section_with(3, vec![]);
        let nested_id = nested.id.clone();
        let mut s = section_with(2, vec![paragraph("p1", "one"), NoHeadingContent::Section(nested)]);
        let before = s.clone();
        let mut called = false;

        assert!(split_section(&mut s, "missing", &Placeholders::default(), later(), |_| called = true).is_err());
        assert!(split_section(&mut s, &nested_id, &Placeholders::default(), later(), |_| called = true).is_err());

        assert!(!called);
        assert_eq!(s, before);
    }

    #[test]
    fn test_insert_paragraph_after_heading_follows_display_state() {
        let mut s = section_with(1, vec![paragraph("p1", "body")]);

        let focus = insert_paragraph_after_heading(&mut s, later()).unwrap();
        assert_eq!(s.children[0].id(), focus.node_id);
        assert_eq!(s.children.len(), 2);

        toggle_read_mode(&mut s, later()).unwrap();
        let focus = insert_paragraph_after_heading(&mut s, later()).unwrap();
        assert_eq!(s.summary[0].id(), focus.node_id);
    }

    #[test]
    fn test_insert_paragraph_rejected_when_collapsed_or_other_view() {
        let mut s = section_with(1, vec![]);
        s.view = SectionView::canonical(DisplayState::Collapsed);
        let before = s.clone();
        assert!(insert_paragraph_after_heading(&mut s, later()).is_err());
        assert_eq!(s, before);

        let mut s = section_with(1, vec![]);
        s.active_view = "collection/section/page".to_string();
        assert!(matches!(
            insert_paragraph_after_heading(&mut s, later()),
            Err(EditError::ViewRejected { .. })
        ));
    }

    #[test]
    fn test_toggle_read_mode_cycle() {
        let mut s = section_with(1, vec![]);

        assert_eq!(toggle_read_mode(&mut s, later()).unwrap(), DisplayState::Summary);
        assert_eq!(toggle_read_mode(&mut s, later()).unwrap(), DisplayState::Expanded);

        s.view = SectionView::canonical(DisplayState::Collapsed);
        assert_eq!(toggle_read_mode(&mut s, later()).unwrap(), DisplayState::Expanded);
        assert_eq!(s.last_modified, later());
    }

    #[test]
    fn test_create_summary_paragraph_is_empty() {
        let p = create_summary_paragraph(ts());
        assert!(p.content.is_empty());
        assert_eq!(p.created, ts());
    }
}
