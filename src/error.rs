//! Unified error type for the one-call helpers.

use firestore_json_core::TranscodeError;
use firestore_json_engine::ConvertError;
use thiserror::Error;

/// Errors returned by [`crate::to_firestore`], [`crate::from_firestore`]
/// and [`crate::convert`].
#[derive(Debug, Error)]
pub enum Error {
    /// The value passed in is not a JSON object
    #[error("document must be a JSON object, got {found}")]
    NotAnObject {
        /// JSON type found instead
        found: &'static str,
    },

    /// Encoding or decoding failed
    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    /// Neither direction applies
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Result type for the one-call helpers.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Path to the offending node, when the failure has one.
    pub fn path(&self) -> Option<&firestore_json_core::FieldPath> {
        match self {
            Error::Transcode(e) => Some(e.path()),
            Error::Convert(ConvertError::Decode(e)) | Error::Convert(ConvertError::Encode(e)) => {
                Some(e.path())
            }
            _ => None,
        }
    }
}
