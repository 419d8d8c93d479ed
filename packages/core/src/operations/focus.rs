//! Focus requests handed back to the editing surface
//!
//! Edits never move focus themselves. They return a [`FocusRequest`] and the
//! caller dispatches it to a [`FocusSurface`] once the surface has observed
//! the new tree shape.

use serde::{Deserialize, Serialize};

/// Where to place the cursor inside the focused node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorPosition {
    Start,
    End,
    /// Character offset from the start of the node's text
    Offset(usize),
}

/// "Focus node X with the cursor at P"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRequest {
    pub node_id: String,
    pub cursor: CursorPosition,
}

impl FocusRequest {
    pub fn new(node_id: impl Into<String>, cursor: CursorPosition) -> Self {
        Self {
            node_id: node_id.into(),
            cursor,
        }
    }

    pub fn start(node_id: impl Into<String>) -> Self {
        Self::new(node_id, CursorPosition::Start)
    }

    pub fn end(node_id: impl Into<String>) -> Self {
        Self::new(node_id, CursorPosition::End)
    }
}

/// The rendering surface that owns cursor and selection
pub trait FocusSurface {
    /// Whether the node currently has a visual surface
    fn is_mounted(&self, node_id: &str) -> bool;

    /// Move input focus; returns false when the surface refused
    fn focus(&mut self, node_id: &str, cursor: CursorPosition) -> bool;
}

/// Surface that mounts nothing; every request is dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedSurface;

impl FocusSurface for DetachedSurface {
    fn is_mounted(&self, _node_id: &str) -> bool {
        false
    }

    fn focus(&mut self, _node_id: &str, _cursor: CursorPosition) -> bool {
        false
    }
}
