//! Section container edits
//!
//! Ordered insert and remove on a container's sections, plus the two
//! re-homing primitives used when a section moves up a level.

use crate::config::{ContainerDefaults, Placeholders};
use crate::models::{NoHeadingContent, Section, SectionContainer};
use crate::operations::error::{EditError, EditResult};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Create an empty container with the canonical view list
pub fn create_section_container(defaults: &ContainerDefaults, now: DateTime<Utc>) -> SectionContainer {
    SectionContainer::new(defaults, now)
}

/// Append a placeholder section at `level`; returns its id
pub fn add_section(
    container: &mut SectionContainer,
    level: u32,
    placeholders: &Placeholders,
    now: DateTime<Utc>,
) -> String {
    let section = Section::placeholder(level, placeholders, now);
    let id = section.id.clone();
    container.children.push(section);
    container.last_modified = now;
    debug!(container_id = %container.id, section_id = %id, level, "added section");
    id
}

/// Insert `section` at `index`, appending when `index` is `None` or past the end
pub fn add_section_to_container(
    container: &mut SectionContainer,
    section: Section,
    index: Option<usize>,
    now: DateTime<Utc>,
) {
    match index {
        Some(index) if index <= container.children.len() => container.children.insert(index, section),
        _ => container.children.push(section),
    }
    container.last_modified = now;
}

/// Remove the direct child `section_id` and hand it back
pub fn remove_section_from_container(
    container: &mut SectionContainer,
    section_id: &str,
    now: DateTime<Utc>,
) -> EditResult<Section> {
    let index = container
        .position_of(section_id)
        .ok_or_else(|| EditError::node_not_found(section_id))?;
    let section = container.children.remove(index);
    container.last_modified = now;
    Ok(section)
}

/// Insert `section` right after the sibling `after_id`, appending when it is absent
pub fn add_section_after(
    container: &mut SectionContainer,
    section: Section,
    after_id: &str,
    now: DateTime<Utc>,
) {
    let index = container.position_of(after_id).map(|i| i + 1);
    add_section_to_container(container, section, index, now);
}

/// Move every section after `section_id` in `container` under that section
///
/// The moved sections keep their order and land in the section's trailing
/// container, which is created when the section's last child is not one.
/// Returns how many sections moved; nothing is created when none follow.
pub fn move_siblings_to_section(
    container: &mut SectionContainer,
    section_id: &str,
    defaults: &ContainerDefaults,
    now: DateTime<Utc>,
) -> EditResult<usize> {
    let index = container
        .position_of(section_id)
        .ok_or_else(|| EditError::node_not_found(section_id))?;

    let followers = container.children.split_off(index + 1);
    if followers.is_empty() {
        return Ok(0);
    }
    let moved = followers.len();

    let target = &mut container.children[index];
    if !matches!(target.children.last(), Some(NoHeadingContent::SectionContainer(_))) {
        target
            .children
            .push(NoHeadingContent::SectionContainer(SectionContainer::new(defaults, now)));
    }
    if let Some(NoHeadingContent::SectionContainer(nested)) = target.children.last_mut() {
        nested.children.extend(followers);
        nested.last_modified = now;
    }
    target.last_modified = now;
    container.last_modified = now;

    debug!(section_id, moved, "moved following siblings under section");
    Ok(moved)
}

/// Move everything after `container_id` in `parent.children` to the end of `target.children`
///
/// Returns how many nodes moved; `0` when the container is last.
pub fn move_children_to_section(
    parent: &mut Section,
    container_id: &str,
    target: &mut Section,
    now: DateTime<Utc>,
) -> EditResult<usize> {
    let index = parent
        .children
        .iter()
        .position(|n| n.id() == container_id)
        .ok_or_else(|| EditError::node_not_found(container_id))?;

    let trailing = parent.children.split_off(index + 1);
    let moved = trailing.len();
    if moved > 0 {
        target.children.extend(trailing);
        parent.last_modified = now;
        target.last_modified = now;
        debug!(parent_id = %parent.id, target_id = %target.id, moved, "moved trailing children");
    }
    Ok(moved)
}
