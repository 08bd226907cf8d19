//! # firestore-json
//!
//! Bidirectional converter between plain JSON and the Firestore REST document
//! encoding, where every value is wrapped in an object naming its type.
//!
//! ## Quick Start
//!
//! ```
//! use firestore_json::prelude::*;
//!
//! let wire = to_firestore(&json!({"age": 30, "name": "Ann"})).unwrap();
//! assert_eq!(wire, json!({"age": {"integerValue": "30"}, "name": {"stringValue": "Ann"}}));
//!
//! let plain = from_firestore(&wire).unwrap();
//! assert_eq!(plain, json!({"age": 30, "name": "Ann"}));
//!
//! // Direction detected from the document itself
//! let out = convert(&wire).unwrap();
//! assert_eq!(out.direction, Direction::Decode);
//! ```
//!
//! ## Layers
//!
//! - [`firestore_json_core`] - value model, type tags, paths, errors
//! - [`firestore_json_wire`] - the decoder and encoder
//! - [`firestore_json_engine`] - direction detection, files, batches, config

#![warn(missing_docs)]

mod error;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};

pub use firestore_json_core::{
    FieldPath, TranscodeError, TranscodeOptions, TypeTag, Value, WireNode, DEFAULT_MAX_DEPTH,
};
pub use firestore_json_engine::{
    BatchConverter, BatchReport, Conversion, ConvertError, Direction, EngineConfig, EngineError,
    FileIo, Processor,
};
pub use firestore_json_wire::{
    decode_document, decode_json_document, decode_wire_document, encode_document,
    encode_json_document,
};

pub use firestore_json_core;
pub use firestore_json_engine;
pub use firestore_json_wire;

use serde_json::{Map, Value as JsonValue};

/// Wrap a plain JSON object in Firestore type wrappers.
pub fn to_firestore(doc: &JsonValue) -> Result<JsonValue> {
    to_firestore_with(doc, &TranscodeOptions::default())
}

/// [`to_firestore`] with explicit options.
pub fn to_firestore_with(doc: &JsonValue, options: &TranscodeOptions) -> Result<JsonValue> {
    let encoded = encode_json_document(as_object(doc)?, options)?;
    Ok(JsonValue::Object(encoded))
}

/// Strip Firestore type wrappers from a wire document.
pub fn from_firestore(doc: &JsonValue) -> Result<JsonValue> {
    from_firestore_with(doc, &TranscodeOptions::default())
}

/// [`from_firestore`] with explicit options.
pub fn from_firestore_with(doc: &JsonValue, options: &TranscodeOptions) -> Result<JsonValue> {
    let decoded = decode_json_document(as_object(doc)?, options)?;
    Ok(JsonValue::Object(decoded))
}

/// Convert in whichever direction applies, decoding first.
pub fn convert(doc: &JsonValue) -> Result<Conversion> {
    Ok(Processor::default().convert(as_object(doc)?)?)
}

fn as_object(doc: &JsonValue) -> Result<&Map<String, JsonValue>> {
    doc.as_object().ok_or(Error::NotAnObject {
        found: match doc {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        },
    })
}
