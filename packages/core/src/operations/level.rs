//! Heading Level Restructuring
//!
//! Changing a section's heading level by one re-parents the section so that
//! every nested section stays exactly one level deeper than the section that
//! owns it.
//!
//! # Increase
//!
//! The section moves into the trailing container of its preceding peer (the
//! peer found by [`SectionLookup::preceding_section`] at the section's current
//! level). Containers that were direct children of the section are flattened:
//! their sections become the moved section's siblings, right after it.
//!
//! # Decrease
//!
//! The section leaves its container and is placed in the grandparent
//! container right after its former parent. Sections that followed it become
//! its children, and so does whatever trailed the old container inside the
//! parent. Sections that still own containers are refused.
//!
//! All lookups and checks run before the first mutation, so an `Err` leaves
//! the tree untouched.

use crate::config::ContainerDefaults;
use crate::models::{NoHeadingContent, Section, SectionContainer};
use crate::operations::container::{add_section_after, move_children_to_section, move_siblings_to_section};
use crate::operations::error::{EditError, EditResult};
use crate::operations::lookup::SectionLookup;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Outcome of a successful level change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelChange {
    pub section_id: String,
    pub old_level: u32,
    pub new_level: u32,
    /// Container the section now lives in
    pub container_id: String,
    /// Section that now owns that container
    pub parent_id: Option<String>,
}

fn find_section<'a>(root: &'a NoHeadingContent, section_id: &str) -> EditResult<&'a Section> {
    root.find_section(section_id)
        .ok_or_else(|| EditError::node_not_found(section_id))
}

fn is_root(root: &NoHeadingContent, section_id: &str) -> bool {
    root.id() == section_id
}

/// Nest `section_id` one level deeper under its preceding peer
///
/// # Errors
///
/// - `NodeNotFound` when the section is not in the tree
/// - `RootNotDetachable` when the section is the tree root
/// - `NoPrecedingSection` when the lookup finds no peer to nest under
pub fn increase_level<L: SectionLookup + ?Sized>(
    root: &mut NoHeadingContent,
    section_id: &str,
    lookup: &mut L,
    defaults: &ContainerDefaults,
    now: DateTime<Utc>,
) -> EditResult<LevelChange> {
    let old_level = find_section(root, section_id)?.level();
    if is_root(root, section_id) {
        return Err(EditError::root_not_detachable(section_id));
    }

    let parent_id = lookup
        .preceding_section(root, section_id, old_level)
        .ok_or_else(|| EditError::no_preceding_section(section_id, old_level))?;
    let parent = root
        .find_section(&parent_id)
        .ok_or_else(|| EditError::lookup_failed(section_id, "preceding section"))?;
    if parent.contains_id(section_id) {
        return Err(EditError::lookup_failed(section_id, "preceding section"));
    }

    let mut section = lookup
        .detach_section(root, section_id, now)
        .ok_or_else(|| EditError::lookup_failed(section_id, "owning array"))?;

    let new_level = old_level + 1;
    section.heading.level = new_level;
    section.heading.last_modified = now;
    section.last_modified = now;

    // Sections held in the section's own containers become its siblings
    let mut flattened = Vec::new();
    section.children.retain_mut(|child| match child {
        NoHeadingContent::SectionContainer(c) => {
            flattened.append(&mut c.children);
            false
        }
        _ => true,
    });

    let parent = root
        .find_section_mut(&parent_id)
        .ok_or_else(|| EditError::lookup_failed(section_id, "preceding section"))?;
    if !matches!(parent.children.last(), Some(NoHeadingContent::SectionContainer(_))) {
        parent
            .children
            .push(NoHeadingContent::SectionContainer(SectionContainer::new(defaults, now)));
    }
    let container_id = match parent.children.last_mut() {
        Some(NoHeadingContent::SectionContainer(container)) => {
            let lifted = flattened.len();
            container.children.push(section);
            container.children.extend(flattened);
            container.last_modified = now;
            debug!(section_id, lifted, "flattened nested containers");
            container.id.clone()
        }
        _ => return Err(EditError::lookup_failed(section_id, "trailing container")),
    };
    parent.last_modified = now;

    lookup.section_moved(section_id);
    debug!(section_id, parent_id = %parent_id, new_level, "increased heading level");

    Ok(LevelChange {
        section_id: section_id.to_string(),
        old_level,
        new_level,
        container_id,
        parent_id: Some(parent_id),
    })
}

/// Move `section_id` up one level, next to its former parent
///
/// # Errors
///
/// - `NodeNotFound` when the section is not in the tree
/// - `LevelAtFloor` when the section is at level 1
/// - `HasContainerChildren` when the section owns section containers
/// - `LookupFailed` when the enclosing container, parent section or
///   grandparent container cannot be resolved, or they do not nest as expected
pub fn decrease_level<L: SectionLookup + ?Sized>(
    root: &mut NoHeadingContent,
    section_id: &str,
    lookup: &mut L,
    defaults: &ContainerDefaults,
    now: DateTime<Utc>,
) -> EditResult<LevelChange> {
    let section = find_section(root, section_id)?;
    let old_level = section.level();
    if old_level <= 1 {
        return Err(EditError::level_at_floor(section_id.to_string(), old_level));
    }
    if section.has_container_children() {
        return Err(EditError::has_container_children(section_id));
    }

    let container_id = lookup
        .enclosing_container(root, section_id)
        .ok_or_else(|| EditError::lookup_failed(section_id, "enclosing container"))?;
    let parent_id = lookup
        .enclosing_section(root, &container_id)
        .ok_or_else(|| EditError::lookup_failed(section_id, "parent section"))?;
    let grandparent_id = lookup
        .grandparent_container(root, section_id)
        .ok_or_else(|| EditError::lookup_failed(section_id, "grandparent container"))?;

    check_nesting(root, section_id, &container_id, &parent_id, &grandparent_id)?;

    move_siblings_to_section(
        root.find_container_mut(&container_id)
            .ok_or_else(|| EditError::lookup_failed(section_id, "enclosing container"))?,
        section_id,
        defaults,
        now,
    )?;

    let mut section = lookup
        .detach_section(root, section_id, now)
        .ok_or_else(|| EditError::lookup_failed(section_id, "owning array"))?;

    let parent = root
        .find_section_mut(&parent_id)
        .ok_or_else(|| EditError::lookup_failed(section_id, "parent section"))?;
    move_children_to_section(parent, &container_id, &mut section, now)?;

    let new_level = old_level - 1;
    section.heading.level = new_level;
    section.heading.last_modified = now;
    section.last_modified = now;

    let grandparent = root
        .find_container_mut(&grandparent_id)
        .ok_or_else(|| EditError::lookup_failed(section_id, "grandparent container"))?;
    add_section_after(grandparent, section, &parent_id, now);

    lookup.section_moved(section_id);
    debug!(section_id, parent_id = %parent_id, new_level, "decreased heading level");

    Ok(LevelChange {
        section_id: section_id.to_string(),
        old_level,
        new_level,
        parent_id: lookup.enclosing_section(root, &grandparent_id),
        container_id: grandparent_id,
    })
}

/// Confirm container ⊂ parent ⊂ grandparent with direct ownership at each step
fn check_nesting(
    root: &NoHeadingContent,
    section_id: &str,
    container_id: &str,
    parent_id: &str,
    grandparent_id: &str,
) -> EditResult<()> {
    let container = root
        .find_container(container_id)
        .filter(|c| c.position_of(section_id).is_some())
        .ok_or_else(|| EditError::lookup_failed(section_id, "enclosing container"))?;
    let parent = root
        .find_section(parent_id)
        .filter(|p| p.children.iter().any(|n| n.id() == container.id))
        .ok_or_else(|| EditError::lookup_failed(section_id, "parent section"))?;
    root.find_container(grandparent_id)
        .filter(|g| g.position_of(&parent.id).is_some())
        .ok_or_else(|| EditError::lookup_failed(section_id, "grandparent container"))?;
    Ok(())
}

#[cfg(test)]
#[path = "level_test.rs"]
mod level_test;
