//! Structural Edits
//!
//! Synchronous, in-place edits on the content tree:
//!
//! - [`paragraph`] - split and join paragraphs in a section's `children` or `summary`
//! - [`section`] - split a section at a paragraph, Enter after a heading, read mode
//! - [`container`] - insert and remove sections in a section container
//! - [`level`] - promote or demote a section's heading level
//! - [`navigation`] - where the cursor goes next
//!
//! Every edit takes one operation timestamp and stamps each node it changes
//! with it. Preconditions are checked before the first mutation; an
//! [`EditError`] means the tree was not touched.

pub mod container;
pub mod error;
pub mod focus;
pub mod level;
pub mod lookup;
pub mod navigation;
pub mod paragraph;
pub mod section;

pub use container::{
    add_section, add_section_after, add_section_to_container, create_section_container,
    move_children_to_section, move_siblings_to_section, remove_section_from_container,
};
pub use error::{EditError, EditResult};
pub use focus::{CursorPosition, DetachedSurface, FocusRequest, FocusSurface};
pub use level::{decrease_level, increase_level, LevelChange};
pub use lookup::{AncestorLookup, SectionLookup};
pub use paragraph::{join_with_previous_paragraph, split_paragraph};
pub use section::{
    create_summary_paragraph, insert_paragraph_after_heading, split_section, toggle_read_mode,
};
