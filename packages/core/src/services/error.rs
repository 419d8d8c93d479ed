//! Service Layer Error Types
//!
//! This module defines error types for service-layer operations: loading and
//! saving documents, migrating them, and applying edits through the editor
//! service.

use crate::db::StoreError;
use crate::models::ValidationError;
use crate::operations::EditError;
use thiserror::Error;

/// Document service errors
///
/// Provides high-level error types for all service operations,
/// with proper error chaining from the store and model layers.
#[derive(Error, Debug)]
pub enum DocumentServiceError {
    /// Document not found by ID
    #[error("Document not found: {id}")]
    DocumentNotFound { id: String },

    /// Node not found inside a document
    #[error("Node not found in document {document_id}: {node_id}")]
    NodeNotFound { document_id: String, node_id: String },

    /// Tree invariants do not hold
    #[error("Document validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Storage operation failed
    #[error("Store operation failed: {0}")]
    StoreError(#[from] StoreError),

    /// Structural edit refused
    #[error("Edit refused: {0}")]
    EditRefused(#[from] EditError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DocumentServiceError {
    /// Create a DocumentNotFound error
    pub fn document_not_found(id: impl Into<String>) -> Self {
        Self::DocumentNotFound { id: id.into() }
    }

    /// Create a NodeNotFound error
    pub fn node_not_found(document_id: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self::NodeNotFound {
            document_id: document_id.into(),
            node_id: node_id.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization_error(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}

impl From<serde_json::Error> for DocumentServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_not_found_display() {
        let err = DocumentServiceError::document_not_found("doc-1");
        assert_eq!(err.to_string(), "Document not found: doc-1");
    }

    #[test]
    fn test_edit_error_converts() {
        let err: DocumentServiceError = EditError::node_not_found("s1").into();
        assert!(matches!(err, DocumentServiceError::EditRefused(_)));
        assert_eq!(err.to_string(), "Edit refused: Node 's1' does not exist");
    }

    #[test]
    fn test_serde_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: DocumentServiceError = parse.unwrap_err().into();
        assert!(matches!(err, DocumentServiceError::SerializationError(_)));
    }
}
