//! Firestore wire transcoder
//!
//! This crate converts between plain JSON documents and the Firestore REST
//! document encoding, where every value is wrapped in a single-key object
//! naming its type.
//!
//! ## Wire Encoding Rules
//!
//! | Plain value | Wire node |
//! |-------------|-----------|
//! | `null` | `{"nullValue": null}` |
//! | `true` | `{"booleanValue": true}` |
//! | `30`, `30.0` | `{"integerValue": "30"}` |
//! | `2.5` | `{"doubleValue": 2.5}` |
//! | `"SGk="` | `{"bytesValue": "SGk="}` |
//! | `"2024-01-01T00:00:00Z"` | `{"timestampValue": "2024-01-01T00:00:00Z"}` |
//! | `"Ann"` | `{"stringValue": "Ann"}` |
//! | `[...]` | `{"arrayValue": {"values": [...]}}` |
//! | `{...}` | `{"mapValue": {"fields": {...}}}` |
//!
//! ## Examples
//!
//! ```
//! use firestore_json_wire::{decode_json_document, encode_json_document};
//! use firestore_json_core::TranscodeOptions;
//! use serde_json::json;
//!
//! let options = TranscodeOptions::default();
//!
//! let plain = json!({"age": 30});
//! let wire = encode_json_document(plain.as_object().unwrap(), &options).unwrap();
//! assert_eq!(serde_json::Value::Object(wire.clone()), json!({"age": {"integerValue": "30"}}));
//!
//! let back = decode_json_document(&wire, &options).unwrap();
//! assert_eq!(serde_json::Value::Object(back), plain);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json;

// Re-export main entry points
pub use json::{
    check_strict_base64, classify_string, decode_document, decode_json_document, decode_node,
    decode_wire_document, encode_document, encode_json_document, encode_value, is_rfc3339,
    is_strict_base64, parse_rfc3339,
};
