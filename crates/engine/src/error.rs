//! Engine error types
//!
//! Transcoder failures stay [`TranscodeError`]s; everything the engine adds
//! around them (files, configuration, batch arguments) lives here.

use firestore_json_core::TranscodeError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// A conversion that failed in the direction(s) attempted
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConvertError {
    /// Decoding from the Firestore format was requested and failed
    #[error("failed to convert from the Firestore format: {0}")]
    Decode(TranscodeError),

    /// Encoding into the Firestore format was requested and failed
    #[error("failed to convert to the Firestore format: {0}")]
    Encode(TranscodeError),

    /// Neither direction applies to the document
    #[error("document is neither a valid Firestore document ({decode}) nor encodable into one ({encode})")]
    Undetermined {
        /// Why decoding failed
        decode: TranscodeError,
        /// Why encoding failed
        encode: TranscodeError,
    },
}

/// All engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Batch arguments are unusable as given
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Every path pair failed validation
    #[error("no valid input/output pairs left to process")]
    NoValidPairs,

    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A file does not contain valid JSON, or a result failed to serialize
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A file holds valid JSON whose top level is not an object
    #[error("{path} does not contain a JSON object at the top level (found {found})")]
    NotAnObject {
        /// File involved
        path: PathBuf,
        /// JSON type found instead
        found: &'static str,
    },

    /// Configuration file is missing or invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// The document could not be converted
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl EngineError {
    /// Check if this error ends a whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidArguments(_) | EngineError::NoValidPairs | EngineError::Config(_)
        )
    }
}
