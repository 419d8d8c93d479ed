//! Utility functions for Quire Core
//!
//! - [`markdown`] - markdown export of content trees, plain-text and slug helpers

pub mod markdown;

pub use markdown::{content_to_markdown, slugify, strip_markdown};
