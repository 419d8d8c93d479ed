//! Lookup collaborator for heading level changes
//!
//! Level changes need to know where a section sits: its preceding peer, its
//! enclosing container, the section owning that container and the container
//! one level further up. Those answers depend on how the surrounding editor
//! navigates the tree, so they sit behind [`SectionLookup`]. Every query
//! returns node ids; the caller re-resolves them against the tree after each
//! ownership transfer.

use crate::models::{NoHeadingContent, Section};
use crate::traversal::{path_to, NodeRef};
use chrono::{DateTime, Utc};

/// Environment-aware queries used by `increase_level` / `decrease_level`
pub trait SectionLookup {
    /// Closest section before `section_id`, at `level`, that can adopt it
    fn preceding_section(&self, root: &NoHeadingContent, section_id: &str, level: u32) -> Option<String>;

    /// Container whose children hold `section_id`
    fn enclosing_container(&self, root: &NoHeadingContent, section_id: &str) -> Option<String>;

    /// Section whose children hold `container_id`
    fn enclosing_section(&self, root: &NoHeadingContent, container_id: &str) -> Option<String>;

    /// Container holding the parent section of `section_id`
    fn grandparent_container(&self, root: &NoHeadingContent, section_id: &str) -> Option<String>;

    /// Remove `section_id` from whichever array holds it
    fn detach_section(
        &mut self,
        root: &mut NoHeadingContent,
        section_id: &str,
        now: DateTime<Utc>,
    ) -> Option<Section> {
        root.remove_section(section_id, now)
    }

    /// Called once a section has been re-parented
    fn section_moved(&mut self, _section_id: &str) {}
}

/// Lookup that navigates the owned tree through each node's ancestor chain
///
/// The preceding peer is searched among earlier siblings in the same array
/// only; a section is never re-parented under a cousin.
#[derive(Debug, Clone, Default)]
pub struct AncestorLookup {
    moved: Vec<String>,
}

impl AncestorLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids reported through [`SectionLookup::section_moved`], oldest first
    pub fn moved(&self) -> &[String] {
        &self.moved
    }
}

/// Sections of the one array under `owner` that holds `section_id`
fn sibling_sections<'a>(owner: NodeRef<'a>, section_id: &str) -> Vec<&'a Section> {
    let sections_of = |nodes: &'a [NoHeadingContent]| -> Vec<&'a Section> {
        nodes.iter().filter_map(NoHeadingContent::as_section).collect()
    };
    match owner {
        NodeRef::SectionContainer(c) => c.children.iter().collect(),
        NodeRef::Section(s) => {
            if s.summary.iter().any(|node| node.id() == section_id) {
                sections_of(&s.summary)
            } else {
                sections_of(&s.children)
            }
        }
        NodeRef::UntitledSection(u) => sections_of(&u.children),
        NodeRef::Paragraph(_) | NodeRef::Heading(_) => Vec::new(),
    }
}

impl SectionLookup for AncestorLookup {
    fn preceding_section(&self, root: &NoHeadingContent, section_id: &str, level: u32) -> Option<String> {
        let path = path_to(root, section_id)?;
        let owner = *path.last()?;
        let siblings = sibling_sections(owner, section_id);
        let index = siblings.iter().position(|s| s.id == section_id)?;

        siblings[..index]
            .iter()
            .rev()
            .find(|s| s.level() == level)
            .map(|s| s.id.clone())
    }

    fn enclosing_container(&self, root: &NoHeadingContent, section_id: &str) -> Option<String> {
        let path = path_to(root, section_id)?;
        path.last()?.as_section_container().map(|c| c.id.clone())
    }

    fn enclosing_section(&self, root: &NoHeadingContent, container_id: &str) -> Option<String> {
        let path = path_to(root, container_id)?;
        path.last()?.as_section().map(|s| s.id.clone())
    }

    fn grandparent_container(&self, root: &NoHeadingContent, section_id: &str) -> Option<String> {
        let container_id = self.enclosing_container(root, section_id)?;
        let parent_id = self.enclosing_section(root, &container_id)?;
        self.enclosing_container(root, &parent_id)
    }

    fn section_moved(&mut self, section_id: &str) {
        self.moved.push(section_id.to_string());
    }
}
