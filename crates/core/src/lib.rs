//! Shared type grammar for the Firestore JSON converter
//!
//! This crate owns the vocabulary both directions of the transcoder speak:
//!
//! - [`Value`]: the plain JSON side
//! - [`WireNode`]: the typed Firestore REST side
//! - [`TypeTag`]: the fixed set of supported type tags
//! - [`FieldPath`]: diagnostic paths threaded through recursion
//! - [`TranscodeError`]: path-qualified failures
//! - [`TranscodeOptions`]: limits shared by decoder and encoder

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod options;
pub mod path;
pub mod tag;
pub mod value;
pub mod wire;

pub use error::{Result, TranscodeError};
pub use options::{TranscodeOptions, DEFAULT_MAX_DEPTH};
pub use path::FieldPath;
pub use tag::{is_type_tag, TypeTag, ARRAY_VALUES_KEY, MAP_FIELDS_KEY, RESERVED_TAGS};
pub use value::{document_from_json, document_to_json, Document, Map, Value};
pub use wire::{wire_document_into_plain, wire_map_to_json, WireDocument, WireMap, WireNode};
