//! Error types for structural edits
//!
//! Every variant is a precondition that was checked before the tree was
//! touched. Receiving an [`EditError`] therefore always means the tree is
//! exactly as it was before the call.

use crate::models::{ContentSlot, NodeKind};
use thiserror::Error;

/// Errors that can occur during structural edits
///
/// # Examples
///
/// ```rust
/// use quire_core::operations::EditError;
///
/// let err = EditError::level_at_floor("s-1".to_string(), 1);
/// assert_eq!(
///     err.to_string(),
///     "Section 's-1' is already at level 1 and cannot move up"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// Referenced node does not exist in the tree being edited
    #[error("Node '{node_id}' does not exist")]
    NodeNotFound { node_id: String },

    /// Referenced node exists but is not of the kind the edit needs
    #[error("Node '{node_id}' is a {actual}, expected a {expected}")]
    WrongNodeType {
        node_id: String,
        expected: NodeKind,
        actual: NodeKind,
    },

    /// Index outside the target array
    #[error("Index {index} is out of range for {slot:?} of length {len}")]
    IndexOutOfRange {
        slot: ContentSlot,
        index: usize,
        len: usize,
    },

    /// The element to join with is not earlier in the same array
    #[error("Node '{previous_id}' does not precede index {index} in the same array")]
    NotPreceding { previous_id: String, index: usize },

    /// Level decrease on a section already at the top level
    #[error("Section '{section_id}' is already at level {level} and cannot move up")]
    LevelAtFloor { section_id: String, level: u32 },

    /// Level decrease on a section that still owns section containers
    ///
    /// Promoting it would leave the grandchildren at an invalid depth.
    #[error("Section '{section_id}' has section-container children and cannot move up")]
    HasContainerChildren { section_id: String },

    /// Level increase found no preceding section to nest under
    #[error("Section '{section_id}' has no preceding section at level {level}")]
    NoPrecedingSection { section_id: String, level: u32 },

    /// A lookup collaborator could not place the node
    #[error("Could not find the {relation} of '{node_id}'")]
    LookupFailed {
        node_id: String,
        relation: &'static str,
    },

    /// The section's active view does not accept the edit
    #[error("Section '{section_id}' does not accept this edit in its current view: {reason}")]
    ViewRejected { section_id: String, reason: String },

    /// The tree root cannot be moved or removed
    #[error("Node '{node_id}' is the tree root and cannot be detached")]
    RootNotDetachable { node_id: String },
}

impl EditError {
    /// Create a NodeNotFound error
    pub fn node_not_found(node_id: impl Into<String>) -> Self {
        Self::NodeNotFound {
            node_id: node_id.into(),
        }
    }

    /// Create a WrongNodeType error
    pub fn wrong_node_type(node_id: impl Into<String>, expected: NodeKind, actual: NodeKind) -> Self {
        Self::WrongNodeType {
            node_id: node_id.into(),
            expected,
            actual,
        }
    }

    /// Create an IndexOutOfRange error
    pub fn index_out_of_range(slot: ContentSlot, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { slot, index, len }
    }

    /// Create a NotPreceding error
    pub fn not_preceding(previous_id: impl Into<String>, index: usize) -> Self {
        Self::NotPreceding {
            previous_id: previous_id.into(),
            index,
        }
    }

    /// Create a LevelAtFloor error
    pub fn level_at_floor(section_id: String, level: u32) -> Self {
        Self::LevelAtFloor { section_id, level }
    }

    /// Create a HasContainerChildren error
    pub fn has_container_children(section_id: impl Into<String>) -> Self {
        Self::HasContainerChildren {
            section_id: section_id.into(),
        }
    }

    /// Create a NoPrecedingSection error
    pub fn no_preceding_section(section_id: impl Into<String>, level: u32) -> Self {
        Self::NoPrecedingSection {
            section_id: section_id.into(),
            level,
        }
    }

    /// Create a LookupFailed error
    pub fn lookup_failed(node_id: impl Into<String>, relation: &'static str) -> Self {
        Self::LookupFailed {
            node_id: node_id.into(),
            relation,
        }
    }

    /// Create a ViewRejected error
    pub fn view_rejected(section_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ViewRejected {
            section_id: section_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a RootNotDetachable error
    pub fn root_not_detachable(node_id: impl Into<String>) -> Self {
        Self::RootNotDetachable {
            node_id: node_id.into(),
        }
    }
}

/// Result type for structural edits
pub type EditResult<T> = Result<T, EditError>;
