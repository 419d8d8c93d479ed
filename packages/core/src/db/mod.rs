//! Storage Layer
//!
//! Documents persist as opaque JSON blobs behind the [`DocumentStore`] trait.
//! The crate ships an in-memory implementation; hosts bring their own
//! backends.

mod document_store;
mod error;

pub use document_store::{DocumentStore, InMemoryDocumentStore};
pub use error::StoreError;
