//! Collections: sections, section containers and untitled sections
//!
//! # Tree shape
//!
//! - [`NoHeadingContent`] is the element type of every `children` and `summary`
//!   array: a paragraph, a section, an untitled section or a section container.
//! - A [`SectionContainer`] holds sections only. Nesting a container directly in
//!   a container is unrepresentable.
//! - Each container owns its children outright. Moving a node between arrays
//!   is always remove-then-insert of the owned value.
//!
//! # Examples
//!
//! ```rust
//! use quire_core::config::{ContainerDefaults, Placeholders};
//! use quire_core::models::{NoHeadingContent, Section, SectionContainer};
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let mut container = SectionContainer::new(&ContainerDefaults::default(), now);
//! container.children.push(Section::placeholder(1, &Placeholders::default(), now));
//!
//! let root = NoHeadingContent::SectionContainer(container);
//! assert!(root.is_section_container());
//! ```

use crate::config::{ContainerDefaults, Placeholders};
use crate::models::content::{new_node_id, ContentHeading, ContentParagraph};
use crate::models::view::{
    DisplayState, SectionContainerView, SectionDisplay, SectionView, UntitledSectionView,
    SECTION_CONTAINER_DEFAULT_VIEW, SECTION_DEFAULT_VIEW, UNTITLED_SECTION_DEFAULT_VIEW,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of every node shape in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Paragraph,
    Heading,
    Section,
    SectionContainer,
    UntitledSection,
}

impl NodeKind {
    /// The persisted `type` tag
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::Section => "section",
            NodeKind::SectionContainer => "section-container",
            NodeKind::UntitledSection => "untitled-section",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which paragraph-bearing array of a section an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSlot {
    Children,
    Summary,
}

/// A node that may appear in a `children` or `summary` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NoHeadingContent {
    Paragraph(ContentParagraph),
    Section(Section),
    UntitledSection(UntitledSection),
    SectionContainer(SectionContainer),
}

/// A titled container: heading, children and a collapsible summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub heading: ContentHeading,
    pub view: Vec<SectionView>,
    #[serde(rename = "activeView")]
    pub active_view: String,
    pub children: Vec<NoHeadingContent>,
    pub summary: Vec<NoHeadingContent>,
}

/// An untitled grouping of sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionContainer {
    pub id: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub view: Vec<SectionContainerView>,
    #[serde(rename = "activeView")]
    pub active_view: String,
    #[serde(with = "tagged_sections")]
    pub children: Vec<Section>,
}

/// Container members carry the same `"type": "section"` tag as a section
/// anywhere else in the tree.
mod tagged_sections {
    use super::Section;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    #[serde(tag = "type", rename_all = "kebab-case")]
    enum Tagged<'a> {
        Section(&'a Section),
    }

    #[derive(Deserialize)]
    #[serde(tag = "type", rename_all = "kebab-case")]
    enum Owned {
        Section(Section),
    }

    pub fn serialize<S: Serializer>(sections: &[Section], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(sections.iter().map(Tagged::Section))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Section>, D::Error> {
        let members = Vec::<Owned>::deserialize(deserializer)?;
        Ok(members.into_iter().map(|Owned::Section(section)| section).collect())
    }
}

/// A grouping of mixed content without its own heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UntitledSection {
    pub id: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub view: Vec<UntitledSectionView>,
    #[serde(rename = "activeView")]
    pub active_view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub children: Vec<NoHeadingContent>,
}

impl NoHeadingContent {
    pub fn id(&self) -> &str {
        match self {
            NoHeadingContent::Paragraph(p) => &p.id,
            NoHeadingContent::Section(s) => &s.id,
            NoHeadingContent::UntitledSection(u) => &u.id,
            NoHeadingContent::SectionContainer(c) => &c.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NoHeadingContent::Paragraph(_) => NodeKind::Paragraph,
            NoHeadingContent::Section(_) => NodeKind::Section,
            NoHeadingContent::UntitledSection(_) => NodeKind::UntitledSection,
            NoHeadingContent::SectionContainer(_) => NodeKind::SectionContainer,
        }
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, NoHeadingContent::Paragraph(_))
    }

    pub fn is_section(&self) -> bool {
        matches!(self, NoHeadingContent::Section(_))
    }

    pub fn is_section_container(&self) -> bool {
        matches!(self, NoHeadingContent::SectionContainer(_))
    }

    pub fn is_untitled_section(&self) -> bool {
        matches!(self, NoHeadingContent::UntitledSection(_))
    }

    pub fn as_paragraph(&self) -> Option<&ContentParagraph> {
        match self {
            NoHeadingContent::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_paragraph_mut(&mut self) -> Option<&mut ContentParagraph> {
        match self {
            NoHeadingContent::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            NoHeadingContent::Section(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_section_mut(&mut self) -> Option<&mut Section> {
        match self {
            NoHeadingContent::Section(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_section_container(&self) -> Option<&SectionContainer> {
        match self {
            NoHeadingContent::SectionContainer(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_section_container_mut(&mut self) -> Option<&mut SectionContainer> {
        match self {
            NoHeadingContent::SectionContainer(c) => Some(c),
            _ => None,
        }
    }

    /// Bump this node's own `last_modified`
    pub fn touch(&mut self, now: DateTime<Utc>) {
        match self {
            NoHeadingContent::Paragraph(p) => p.last_modified = now,
            NoHeadingContent::Section(s) => s.last_modified = now,
            NoHeadingContent::UntitledSection(u) => u.last_modified = now,
            NoHeadingContent::SectionContainer(c) => c.last_modified = now,
        }
    }

    /// True when this node, or any node below it (headings included), has `id`
    pub fn contains_id(&self, id: &str) -> bool {
        if self.id() == id {
            return true;
        }
        match self {
            NoHeadingContent::Paragraph(_) => false,
            NoHeadingContent::Section(s) => s.contains_id(id),
            NoHeadingContent::UntitledSection(u) => u.children.iter().any(|n| n.contains_id(id)),
            NoHeadingContent::SectionContainer(c) => c.children.iter().any(|s| s.contains_id(id)),
        }
    }

    pub fn find_section(&self, id: &str) -> Option<&Section> {
        match self {
            NoHeadingContent::Paragraph(_) => None,
            NoHeadingContent::Section(s) => s.find_section(id),
            NoHeadingContent::UntitledSection(u) => {
                u.children.iter().find_map(|n| n.find_section(id))
            }
            NoHeadingContent::SectionContainer(c) => {
                c.children.iter().find_map(|s| s.find_section(id))
            }
        }
    }

    pub fn find_section_mut(&mut self, id: &str) -> Option<&mut Section> {
        match self {
            NoHeadingContent::Paragraph(_) => None,
            NoHeadingContent::Section(s) => s.find_section_mut(id),
            NoHeadingContent::UntitledSection(u) => {
                u.children.iter_mut().find_map(|n| n.find_section_mut(id))
            }
            NoHeadingContent::SectionContainer(c) => {
                c.children.iter_mut().find_map(|s| s.find_section_mut(id))
            }
        }
    }

    pub fn find_container(&self, id: &str) -> Option<&SectionContainer> {
        match self {
            NoHeadingContent::Paragraph(_) => None,
            NoHeadingContent::Section(s) => s.find_container(id),
            NoHeadingContent::UntitledSection(u) => {
                u.children.iter().find_map(|n| n.find_container(id))
            }
            NoHeadingContent::SectionContainer(c) => {
                if c.id == id {
                    return Some(c);
                }
                c.children.iter().find_map(|s| s.find_container(id))
            }
        }
    }

    pub fn find_container_mut(&mut self, id: &str) -> Option<&mut SectionContainer> {
        match self {
            NoHeadingContent::Paragraph(_) => None,
            NoHeadingContent::Section(s) => s.find_container_mut(id),
            NoHeadingContent::UntitledSection(u) => u
                .children
                .iter_mut()
                .find_map(|n| n.find_container_mut(id)),
            NoHeadingContent::SectionContainer(c) => {
                if c.id == id {
                    return Some(c);
                }
                c.children
                    .iter_mut()
                    .find_map(|s| s.find_container_mut(id))
            }
        }
    }

    pub fn find_paragraph(&self, id: &str) -> Option<&ContentParagraph> {
        match self {
            NoHeadingContent::Paragraph(p) => (p.id == id).then_some(p),
            NoHeadingContent::Section(s) => s
                .children
                .iter()
                .chain(s.summary.iter())
                .find_map(|n| n.find_paragraph(id)),
            NoHeadingContent::UntitledSection(u) => {
                u.children.iter().find_map(|n| n.find_paragraph(id))
            }
            NoHeadingContent::SectionContainer(c) => c.children.iter().find_map(|s| {
                s.children
                    .iter()
                    .chain(s.summary.iter())
                    .find_map(|n| n.find_paragraph(id))
            }),
        }
    }

    /// Detach the section `id` from whichever array below this node holds it
    ///
    /// The array's owner gets `last_modified = now`. A node cannot detach
    /// itself; the root of a tree is never returned.
    pub fn remove_section(&mut self, id: &str, now: DateTime<Utc>) -> Option<Section> {
        match self {
            NoHeadingContent::Paragraph(_) => None,
            NoHeadingContent::Section(s) => s.remove_descendant_section(id, now),
            NoHeadingContent::UntitledSection(u) => {
                take_section(&mut u.children, id, now).map(|(section, direct)| {
                    if direct {
                        u.last_modified = now;
                    }
                    section
                })
            }
            NoHeadingContent::SectionContainer(c) => c.remove_descendant_section(id, now),
        }
    }

    /// Insert `section` right after the sibling `after_id`, wherever it lives
    ///
    /// Works for siblings held in a container's children and for siblings held
    /// in a `children`/`summary` array. Hands the section back when `after_id`
    /// is not found below this node.
    pub fn insert_section_after(
        &mut self,
        after_id: &str,
        section: Section,
        now: DateTime<Utc>,
    ) -> Result<(), Section> {
        match self {
            NoHeadingContent::Paragraph(_) => Err(section),
            NoHeadingContent::Section(s) => s.insert_descendant_section_after(after_id, section, now),
            NoHeadingContent::UntitledSection(u) => {
                insert_after_in(&mut u.children, &mut u.last_modified, after_id, section, now)
            }
            NoHeadingContent::SectionContainer(c) => {
                c.insert_descendant_section_after(after_id, section, now)
            }
        }
    }
}

/// Remove the section `id` from `nodes` or from anything below them
///
/// Returns the section and whether it sat directly in `nodes`.
fn take_section(
    nodes: &mut Vec<NoHeadingContent>,
    id: &str,
    now: DateTime<Utc>,
) -> Option<(Section, bool)> {
    let direct = nodes
        .iter()
        .position(|n| matches!(n, NoHeadingContent::Section(s) if s.id == id));

    if let Some(index) = direct {
        return match nodes.remove(index) {
            NoHeadingContent::Section(section) => Some((section, true)),
            _ => None,
        };
    }

    nodes
        .iter_mut()
        .find_map(|n| n.remove_section(id, now))
        .map(|section| (section, false))
}

fn insert_after_in(
    nodes: &mut Vec<NoHeadingContent>,
    owner_modified: &mut DateTime<Utc>,
    after_id: &str,
    section: Section,
    now: DateTime<Utc>,
) -> Result<(), Section> {
    if let Some(index) = nodes.iter().position(|n| n.id() == after_id) {
        nodes.insert(index + 1, NoHeadingContent::Section(section));
        *owner_modified = now;
        return Ok(());
    }

    let mut section = section;
    for node in nodes.iter_mut() {
        match node.insert_section_after(after_id, section, now) {
            Ok(()) => return Ok(()),
            Err(returned) => section = returned,
        }
    }
    Err(section)
}

impl Section {
    /// Create a section around `heading` with empty children and summary
    pub fn new(heading: ContentHeading, now: DateTime<Utc>) -> Self {
        Self {
            id: new_node_id(),
            created: now,
            last_modified: now,
            heading,
            view: SectionView::canonical(DisplayState::Expanded),
            active_view: SECTION_DEFAULT_VIEW.to_string(),
            children: Vec::new(),
            summary: Vec::new(),
        }
    }

    /// Create a section filled with placeholder heading, summary and first paragraph
    pub fn placeholder(level: u32, placeholders: &Placeholders, now: DateTime<Utc>) -> Self {
        let mut section = Self::new(ContentHeading::new(&placeholders.heading, level, now), now);
        section.summary.push(NoHeadingContent::Paragraph(ContentParagraph::new(
            &placeholders.summary,
            now,
        )));
        section.children.push(NoHeadingContent::Paragraph(ContentParagraph::new(
            &placeholders.first_paragraph,
            now,
        )));
        section
    }

    pub fn level(&self) -> u32 {
        self.heading.level
    }

    pub fn slot(&self, slot: ContentSlot) -> &Vec<NoHeadingContent> {
        match slot {
            ContentSlot::Children => &self.children,
            ContentSlot::Summary => &self.summary,
        }
    }

    pub fn slot_mut(&mut self, slot: ContentSlot) -> &mut Vec<NoHeadingContent> {
        match slot {
            ContentSlot::Children => &mut self.children,
            ContentSlot::Summary => &mut self.summary,
        }
    }

    /// The structured display state of the default view, if present
    pub fn display(&self) -> Option<&SectionDisplay> {
        self.view.iter().find_map(|v| match v {
            SectionView::Default { state } => Some(state),
            _ => None,
        })
    }

    pub fn display_mut(&mut self) -> Option<&mut SectionDisplay> {
        self.view.iter_mut().find_map(|v| match v {
            SectionView::Default { state } => Some(state),
            _ => None,
        })
    }

    /// Display state when the default view is the active one
    pub fn active_display_state(&self) -> Option<DisplayState> {
        if self.active_view != SECTION_DEFAULT_VIEW {
            return None;
        }
        self.display().map(|d| d.state)
    }

    /// True when any direct child is a section container
    pub fn has_container_children(&self) -> bool {
        self.children.iter().any(NoHeadingContent::is_section_container)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.id == id
            || self.heading.id == id
            || self
                .children
                .iter()
                .chain(self.summary.iter())
                .any(|n| n.contains_id(id))
    }

    pub fn find_section(&self, id: &str) -> Option<&Section> {
        if self.id == id {
            return Some(self);
        }
        self.children
            .iter()
            .chain(self.summary.iter())
            .find_map(|n| n.find_section(id))
    }

    pub fn find_section_mut(&mut self, id: &str) -> Option<&mut Section> {
        if self.id == id {
            return Some(self);
        }
        self.children
            .iter_mut()
            .chain(self.summary.iter_mut())
            .find_map(|n| n.find_section_mut(id))
    }

    pub fn find_container(&self, id: &str) -> Option<&SectionContainer> {
        self.children
            .iter()
            .chain(self.summary.iter())
            .find_map(|n| n.find_container(id))
    }

    pub fn find_container_mut(&mut self, id: &str) -> Option<&mut SectionContainer> {
        self.children
            .iter_mut()
            .chain(self.summary.iter_mut())
            .find_map(|n| n.find_container_mut(id))
    }

    fn remove_descendant_section(&mut self, id: &str, now: DateTime<Utc>) -> Option<Section> {
        for slot in [ContentSlot::Children, ContentSlot::Summary] {
            if let Some((section, direct)) = take_section(self.slot_mut(slot), id, now) {
                if direct {
                    self.last_modified = now;
                }
                return Some(section);
            }
        }
        None
    }

    fn insert_descendant_section_after(
        &mut self,
        after_id: &str,
        section: Section,
        now: DateTime<Utc>,
    ) -> Result<(), Section> {
        let section = insert_after_in(
            &mut self.children,
            &mut self.last_modified,
            after_id,
            section,
            now,
        )
        .err();
        match section {
            None => Ok(()),
            Some(section) => insert_after_in(
                &mut self.summary,
                &mut self.last_modified,
                after_id,
                section,
                now,
            ),
        }
    }
}

impl SectionContainer {
    /// Create an empty container carrying the canonical seven-variant view list
    pub fn new(defaults: &ContainerDefaults, now: DateTime<Utc>) -> Self {
        Self {
            id: new_node_id(),
            created: now,
            last_modified: now,
            view: SectionContainerView::canonical(defaults),
            active_view: SECTION_CONTAINER_DEFAULT_VIEW.to_string(),
            children: Vec::new(),
        }
    }

    /// Index of the direct child section `id`
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.children.iter().position(|s| s.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.id == id || self.children.iter().any(|s| s.contains_id(id))
    }

    fn remove_descendant_section(&mut self, id: &str, now: DateTime<Utc>) -> Option<Section> {
        if let Some(index) = self.position_of(id) {
            self.last_modified = now;
            return Some(self.children.remove(index));
        }
        self.children
            .iter_mut()
            .find_map(|s| s.remove_descendant_section(id, now))
    }

    fn insert_descendant_section_after(
        &mut self,
        after_id: &str,
        section: Section,
        now: DateTime<Utc>,
    ) -> Result<(), Section> {
        if let Some(index) = self.position_of(after_id) {
            self.children.insert(index + 1, section);
            self.last_modified = now;
            return Ok(());
        }

        let mut section = section;
        for child in self.children.iter_mut() {
            match child.insert_descendant_section_after(after_id, section, now) {
                Ok(()) => return Ok(()),
                Err(returned) => section = returned,
            }
        }
        Err(section)
    }
}

impl UntitledSection {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: new_node_id(),
            created: now,
            last_modified: now,
            view: UntitledSectionView::canonical(),
            active_view: UNTITLED_SECTION_DEFAULT_VIEW.to_string(),
            summary: None,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts() -> DateTime<Utc> {
        "2025-02-23T01:04:00Z".parse().unwrap()
    }

    fn later() -> DateTime<Utc> {
        "2025-03-01T09:00:00Z".parse().unwrap()
    }

    fn section(id: &str, level: u32) -> Section {
        let mut s = Section::new(ContentHeading::new(id, level, ts()), ts());
        s.id = id.to_string();
        s
    }

    fn container(id: &str, children: Vec<Section>) -> SectionContainer {
        let mut c = SectionContainer::new(&ContainerDefaults::default(), ts());
        c.id = id.to_string();
        c.children = children;
        c
    }

    #[test]
    fn test_union_uses_kebab_case_type_tags() {
        let node = NoHeadingContent::SectionContainer(container("c1", vec![]));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "section-container");

        let untitled = NoHeadingContent::UntitledSection(UntitledSection::new(ts()));
        assert_eq!(serde_json::to_value(&untitled).unwrap()["type"], "untitled-section");
    }

    #[test]
    fn test_decodes_untitled_section_example() {
        let node: NoHeadingContent = serde_json::from_value(json!({
            "type": "untitled-section",
            "id": "u1",
            "created": "2025-02-23T01:04:00Z",
            "last_modified": "2025-02-23T01:04:00Z",
            "view": [{ "type": "collection/untitled-section/default", "state": "expanded" }, { "type": "static" }],
            "activeView": "static",
            "children": [{
                "type": "paragraph",
                "id": "p1",
                "created": "2025-02-23T01:04:00Z",
                "last_modified": "2025-02-23T01:04:00Z",
                "content": "Content in untitled section",
                "view": [{ "type": "content/paragraph/default" }],
                "activeView": "content/paragraph/default"
            }]
        }))
        .unwrap();

        assert!(node.is_untitled_section());
        assert_eq!(node.find_paragraph("p1").unwrap().content, "Content in untitled section");
    }

    #[test]
    fn test_container_rejects_paragraph_children() {
        let result: Result<NoHeadingContent, _> = serde_json::from_value(json!({
            "type": "section-container",
            "id": "c1",
            "created": "2025-02-23T01:04:00Z",
            "last_modified": "2025-02-23T01:04:00Z",
            "view": [],
            "activeView": "collection/section-container/default",
            "children": [{
                "type": "paragraph",
                "id": "p1",
                "created": "2025-02-23T01:04:00Z",
                "last_modified": "2025-02-23T01:04:00Z",
                "content": "not allowed",
                "view": [{ "type": "content/paragraph/default" }],
                "activeView": "content/paragraph/default"
            }]
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_container_members_keep_section_tag() {
        let node = NoHeadingContent::SectionContainer(container("c1", vec![section("a", 1)]));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["children"][0]["type"], "section");
        assert_eq!(value["children"][0]["id"], "a");

        let decoded: NoHeadingContent = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(decoded, node);
        assert_eq!(serde_json::to_value(&decoded).unwrap(), value);

        let mut untagged = value;
        untagged["children"][0]
            .as_object_mut()
            .unwrap()
            .remove("type");
        assert!(serde_json::from_value::<NoHeadingContent>(untagged).is_err());
    }

    #[test]
    fn test_placeholder_section_shape() {
        let s = Section::placeholder(2, &Placeholders::default(), ts());

        assert_eq!(s.heading.content, "New Section");
        assert_eq!(s.level(), 2);
        assert_eq!(s.summary.len(), 1);
        assert_eq!(s.children.len(), 1);
        assert_eq!(s.active_display_state(), Some(DisplayState::Expanded));
    }

    #[test]
    fn test_find_and_remove_nested_section() {
        let mut a = section("a", 1);
        a.children.push(NoHeadingContent::SectionContainer(container(
            "inner",
            vec![section("b", 2), section("c", 2)],
        )));
        let mut root = NoHeadingContent::SectionContainer(container("root", vec![a]));

        assert_eq!(root.find_section("c").unwrap().level(), 2);
        assert!(root.find_container("inner").is_some());

        let removed = root.remove_section("b", later()).unwrap();
        assert_eq!(removed.id, "b");

        let inner = root.find_container("inner").unwrap();
        assert_eq!(inner.children.len(), 1);
        assert_eq!(inner.last_modified, later());
        // Only the direct owner is stamped
        assert_eq!(root.find_section("a").unwrap().last_modified, ts());
    }

    #[test]
    fn test_root_cannot_remove_itself() {
        let mut root = NoHeadingContent::Section(section("a", 1));
        assert!(root.remove_section("a", later()).is_none());
    }

    #[test]
    fn test_insert_section_after_in_children_array() {
        let mut parent = section("parent", 1);
        parent.children.push(NoHeadingContent::Section(section("x", 2)));
        parent.children.push(NoHeadingContent::Paragraph(ContentParagraph::new("tail", ts())));
        let mut root = NoHeadingContent::Section(parent);

        root.insert_section_after("x", section("y", 2), later()).unwrap();

        let parent = root.as_section().unwrap();
        let ids: Vec<&str> = parent.children.iter().map(NoHeadingContent::id).collect();
        assert_eq!(ids[..2], ["x", "y"]);
        assert_eq!(parent.last_modified, later());

        let missing = root.insert_section_after("nope", section("z", 2), later());
        assert_eq!(missing.unwrap_err().id, "z");
    }
}
