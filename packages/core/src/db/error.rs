//! Document Store Error Types
//!
//! Errors raised by [`DocumentStore`](super::DocumentStore) implementations.
//! Missing documents are not errors; `get` returns `None` for them.

use thiserror::Error;

/// Document store operation errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend could not complete the operation
    #[error("Store backend failed: {0}")]
    Backend(String),

    /// Stored blob is not a JSON document
    #[error("Stored document '{id}' is not a JSON object")]
    NotAnObject { id: String },

    /// Document id rejected by the store
    #[error("Invalid document id: '{id}'")]
    InvalidId { id: String },
}

impl StoreError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a not-an-object error
    pub fn not_an_object(id: impl Into<String>) -> Self {
        Self::NotAnObject { id: id.into() }
    }

    /// Create an invalid id error
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", StoreError::invalid_id("")),
            "Invalid document id: ''"
        );
        assert_eq!(
            format!("{}", StoreError::not_an_object("doc-1")),
            "Stored document 'doc-1' is not a JSON object"
        );
    }
}
