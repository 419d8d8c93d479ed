//! Paragraph Editing
//!
//! Split and join operate on one paragraph-bearing array of a section
//! (`children` or `summary`). Both check every precondition before touching
//! the tree.

use crate::models::{ContentParagraph, ContentSlot, NoHeadingContent, NodeKind, Section};
use crate::operations::error::{EditError, EditResult};
use crate::operations::focus::{CursorPosition, FocusRequest};
use chrono::{DateTime, Utc};
use tracing::debug;

fn paragraph_at<'a>(
    items: &'a [NoHeadingContent],
    slot: ContentSlot,
    index: usize,
) -> EditResult<&'a ContentParagraph> {
    let node = items
        .get(index)
        .ok_or_else(|| EditError::index_out_of_range(slot, index, items.len()))?;
    node.as_paragraph()
        .ok_or_else(|| EditError::wrong_node_type(node.id(), NodeKind::Paragraph, node.kind()))
}

/// Split the paragraph at `index` into two paragraphs
///
/// The existing paragraph keeps its id and receives `before`; a new paragraph
/// carrying `after` is inserted right behind it with the same view. Returns a
/// request to focus the new paragraph at its start.
///
/// # Errors
///
/// `IndexOutOfRange` or `WrongNodeType` when `index` does not name a paragraph.
pub fn split_paragraph(
    section: &mut Section,
    slot: ContentSlot,
    before: impl Into<String>,
    after: impl Into<String>,
    index: usize,
    now: DateTime<Utc>,
) -> EditResult<FocusRequest> {
    let template = paragraph_at(section.slot(slot), slot, index)?.clone();

    let created = ContentParagraph::styled_like(&template, after, now);
    let new_id = created.id.clone();

    let items = section.slot_mut(slot);
    if let Some(current) = items[index].as_paragraph_mut() {
        current.content = before.into();
        current.last_modified = now;
    }
    items.insert(index + 1, NoHeadingContent::Paragraph(created));
    section.last_modified = now;

    debug!(section_id = %section.id, ?slot, index, new_id = %new_id, "split paragraph");
    Ok(FocusRequest::start(new_id))
}

/// Append the paragraph at `index` to the earlier paragraph `previous_id`
///
/// The current paragraph is removed. Returns a request to focus the previous
/// paragraph with the cursor at the old boundary, counted in characters.
///
/// # Errors
///
/// - `NotPreceding` when `previous_id` is absent or not before `index`
/// - `IndexOutOfRange` / `WrongNodeType` when either side is not a paragraph
pub fn join_with_previous_paragraph(
    section: &mut Section,
    slot: ContentSlot,
    index: usize,
    previous_id: &str,
    now: DateTime<Utc>,
) -> EditResult<FocusRequest> {
    let items = section.slot(slot);
    let previous_index = items
        .iter()
        .position(|n| n.id() == previous_id)
        .filter(|&i| i < index)
        .ok_or_else(|| EditError::not_preceding(previous_id, index))?;

    let current_content = paragraph_at(items, slot, index)?.content.clone();
    let boundary = paragraph_at(items, slot, previous_index)?.content.chars().count();

    let items = section.slot_mut(slot);
    items.remove(index);
    if let Some(previous) = items[previous_index].as_paragraph_mut() {
        previous.content.push_str(&current_content);
        previous.last_modified = now;
    }
    section.last_modified = now;

    debug!(section_id = %section.id, ?slot, index, previous_id, boundary, "joined paragraphs");
    Ok(FocusRequest::new(previous_id, CursorPosition::Offset(boundary)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentHeading;

    fn ts() -> DateTime<Utc> {
        "2025-02-23T01:04:00Z".parse().unwrap()
    }

    fn later() -> DateTime<Utc> {
        "2025-02-23T02:00:00Z".parse().unwrap()
    }

    fn paragraph(id: &str, text: &str) -> NoHeadingContent {
        let mut p = ContentParagraph::new(text, ts());
        p.id = id.to_string();
        NoHeadingContent::Paragraph(p)
    }

    fn section_with(children: Vec<NoHeadingContent>) -> Section {
        let mut s = Section::new(ContentHeading::new("Title", 1, ts()), ts());
        s.children = children;
        s
    }

    fn texts(items: &[NoHeadingContent]) -> Vec<&str> {
        items
            .iter()
            .filter_map(|n| n.as_paragraph().map(|p| p.content.as_str()))
            .collect()
    }

    #[test]
    fn test_split_paragraph_inserts_after() {
        let mut s = section_with(vec![paragraph("p1", "hello world"), paragraph("p2", "tail")]);

        let focus = split_paragraph(&mut s, ContentSlot::Children, "hello", " world", 0, later()).unwrap();

        assert_eq!(texts(&s.children), vec!["hello", " world", "tail"]);
        assert_eq!(s.children[0].id(), "p1");
        assert_eq!(focus.node_id, s.children[1].id());
        assert_eq!(focus.cursor, CursorPosition::Start);
        assert_eq!(s.last_modified, later());
        assert_eq!(s.children[0].as_paragraph().unwrap().last_modified, later());
    }

    #[test]
    fn test_split_paragraph_in_summary() {
        let mut s = section_with(vec![]);
        s.summary.push(paragraph("s1", "ab"));

        split_paragraph(&mut s, ContentSlot::Summary, "a", "b", 0, later()).unwrap();

        assert_eq!(texts(&s.summary), vec!["a", "b"]);
        assert!(s.children.is_empty());
    }

    #[test]
    fn test_split_non_paragraph_leaves_tree_unchanged() {
        let nested = Section::new(ContentHeading::new("Nested", 2, ts()), ts());
        let mut s = section_with(vec![NoHeadingContent::Section(nested)]);
        let before = s.clone();

        let err = split_paragraph(&mut s, ContentSlot::Children, "a", "b", 0, later()).unwrap_err();
        assert!(matches!(err, EditError::WrongNodeType { .. }));
        assert_eq!(s, before);

        let err = split_paragraph(&mut s, ContentSlot::Children, "a", "b", 3, later()).unwrap_err();
        assert!(matches!(err, EditError::IndexOutOfRange { .. }));
        assert_eq!(s, before);
    }

    #[test]
    fn test_join_with_previous_paragraph() {
        let mut s = section_with(vec![paragraph("p1", "héllo"), paragraph("p2", " world")]);

        let focus = join_with_previous_paragraph(&mut s, ContentSlot::Children, 1, "p1", later()).unwrap();

        assert_eq!(texts(&s.children), vec!["héllo world"]);
        assert_eq!(focus, FocusRequest::new("p1", CursorPosition::Offset(5)));
        assert_eq!(s.last_modified, later());
    }

    #[test]
    fn test_join_rejects_following_or_missing_previous() {
        let mut s = section_with(vec![paragraph("p1", "a"), paragraph("p2", "b")]);
        let before = s.clone();

        assert!(join_with_previous_paragraph(&mut s, ContentSlot::Children, 0, "p2", later()).is_err());
        assert!(join_with_previous_paragraph(&mut s, ContentSlot::Children, 1, "p1x", later()).is_err());
        assert!(join_with_previous_paragraph(&mut s, ContentSlot::Children, 1, "p1", later())
            .is_ok());
        assert_ne!(s, before);
    }

    #[test]
    fn test_join_rejects_non_paragraph_previous() {
        let mut nested = Section::new(ContentHeading::new("Nested", 2, ts()), ts());
        nested.id = "s1".to_string();
        let mut s = section_with(vec![NoHeadingContent::Section(nested), paragraph("p2", "b")]);
        let before = s.clone();

        let err = join_with_previous_paragraph(&mut s, ContentSlot::Children, 1, "s1", later()).unwrap_err();
        assert!(matches!(err, EditError::WrongNodeType { .. }));
        assert_eq!(s, before);
    }

    #[test]
    fn test_join_then_split_restores_text() {
        let mut s = section_with(vec![paragraph("p1", "first "), paragraph("p2", "second")]);

        let focus = join_with_previous_paragraph(&mut s, ContentSlot::Children, 1, "p1", later()).unwrap();
        let CursorPosition::Offset(boundary) = focus.cursor else {
            panic!("expected an offset cursor");
        };

        let joined = s.children[0].as_paragraph().unwrap().content.clone();
        let (a, b) = joined.split_at(boundary);
        split_paragraph(&mut s, ContentSlot::Children, a, b, 0, later()).unwrap();

        assert_eq!(texts(&s.children), vec!["first ", "second"]);
    }
}
