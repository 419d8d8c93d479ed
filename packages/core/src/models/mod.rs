//! Data Models
//!
//! This module contains the content tree used throughout Quire:
//!
//! - [`Document`] - Root wrapper with title, schema version and editing state
//! - [`NoHeadingContent`] - Union of every node allowed in a `children`/`summary` array
//! - [`Section`], [`SectionContainer`], [`UntitledSection`] - Collections
//! - [`ContentParagraph`], [`ContentHeading`] - Leaves
//! - [`view`] - Presentation descriptors carried on every node
//! - [`time`] - Clock abstraction for operation timestamps

mod collection;
mod content;
mod document;
pub mod time;
pub mod view;

pub use collection::{
    ContentSlot, NoHeadingContent, NodeKind, Section, SectionContainer, UntitledSection,
};
pub use content::{new_node_id, ContentHeading, ContentParagraph};
pub use document::{
    Document, DocumentState, EditMode, ValidationError, CURRENT_SCHEMA_VERSION,
};
pub use view::DisplayState;
