//! Transcoder error types
//!
//! Every error is fail-fast and path-qualified: the first violation found
//! aborts the enclosing decode/encode and carries the full path to the node.
//!
//! ## Error Codes
//!
//! | Code | Description |
//! |------|-------------|
//! | Structural | Wrong key count, missing wrapper key, non-object node |
//! | UnsupportedType | Type tag outside the supported set |
//! | TypeMismatch | Payload does not match the type its tag implies |
//! | Format | Malformed base64, timestamp or integer string |
//! | Ambiguity | Plain object already contains a type-tag key |
//! | Unrepresentable | Value with no exact wire form (NaN, ±Inf, integers beyond 64 bits) |
//! | DepthExceeded | Nesting deeper than the configured bound |

use crate::path::FieldPath;
use crate::tag::TypeTag;
use thiserror::Error;

/// Result type for transcoder operations
pub type Result<T> = std::result::Result<T, TranscodeError>;

/// Transcoder error
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TranscodeError {
    /// The node does not have the shape of a type-tagged wrapper
    #[error("structure under the path {path} is invalid: {reason}")]
    Structural {
        /// Path to the offending node
        path: FieldPath,
        /// What is wrong with the structure
        reason: String,
    },

    /// The node's type key is not a supported tag
    #[error("structure under the path {path} contains an unsupported type: {found}")]
    UnsupportedType {
        /// Path to the offending node
        path: FieldPath,
        /// The key that was found
        found: String,
    },

    /// The payload has the wrong underlying type for its tag
    #[error("value under the path {path} with the type {tag} has the wrong underlying type: expected {expected}")]
    TypeMismatch {
        /// Path to the offending payload
        path: FieldPath,
        /// Tag the payload was declared under
        tag: TypeTag,
        /// Expected JSON type
        expected: &'static str,
    },

    /// The payload has the right type but malformed contents
    #[error("value under the path {path} with the type {tag} is malformed: {reason}")]
    Format {
        /// Path to the offending payload
        path: FieldPath,
        /// Tag the payload was declared under
        tag: TypeTag,
        /// Parse failure detail
        reason: String,
    },

    /// A plain object contains a key that is a type tag
    #[error("object under the path {path} contains the key {key}, which is a Firestore type")]
    Ambiguity {
        /// Path to the offending object
        path: FieldPath,
        /// The colliding key
        key: TypeTag,
    },

    /// A plain value has no wire representation
    #[error("value under the path {path} has no Firestore representation: {reason}")]
    Unrepresentable {
        /// Path to the offending value
        path: FieldPath,
        /// Why the value cannot be encoded
        reason: String,
    },

    /// Nesting exceeds the configured depth bound
    #[error("nesting under the path {path} exceeds the maximum depth of {max_depth}")]
    DepthExceeded {
        /// Path to the node past the bound
        path: FieldPath,
        /// Configured bound
        max_depth: usize,
    },
}

impl TranscodeError {
    /// Build a structural error
    pub fn structural(path: &FieldPath, reason: impl Into<String>) -> Self {
        TranscodeError::Structural {
            path: path.clone(),
            reason: reason.into(),
        }
    }

    /// Build a format error
    pub fn format(path: &FieldPath, tag: TypeTag, reason: impl Into<String>) -> Self {
        TranscodeError::Format {
            path: path.clone(),
            tag,
            reason: reason.into(),
        }
    }

    /// Canonical error code
    pub fn code(&self) -> &'static str {
        match self {
            TranscodeError::Structural { .. } => "Structural",
            TranscodeError::UnsupportedType { .. } => "UnsupportedType",
            TranscodeError::TypeMismatch { .. } => "TypeMismatch",
            TranscodeError::Format { .. } => "Format",
            TranscodeError::Ambiguity { .. } => "Ambiguity",
            TranscodeError::Unrepresentable { .. } => "Unrepresentable",
            TranscodeError::DepthExceeded { .. } => "DepthExceeded",
        }
    }

    /// Path of the node that failed
    pub fn path(&self) -> &FieldPath {
        match self {
            TranscodeError::Structural { path, .. }
            | TranscodeError::UnsupportedType { path, .. }
            | TranscodeError::TypeMismatch { path, .. }
            | TranscodeError::Format { path, .. }
            | TranscodeError::Ambiguity { path, .. }
            | TranscodeError::Unrepresentable { path, .. }
            | TranscodeError::DepthExceeded { path, .. } => path,
        }
    }
}
