//! Encoding plain documents into Firestore wire documents
//!
//! Infers the most specific wire type for every plain value:
//!
//! | Plain value | Wire type |
//! |-------------|-----------|
//! | null | `nullValue` |
//! | boolean | `booleanValue` |
//! | number, zero fraction | `integerValue` (decimal string) |
//! | number, fractional | `doubleValue` |
//! | string, padded base64 | `bytesValue` |
//! | string, RFC 3339 | `timestampValue` |
//! | any other string | `stringValue` |
//! | array | `arrayValue` |
//! | object | `mapValue` |
//!
//! Integer vs double depends only on the fractional part, not the literal:
//! `5.0` encodes as `{"integerValue": "5"}`.

use super::classify::{is_rfc3339, is_strict_base64};
use firestore_json_core::{
    document_from_json, wire_map_to_json, Document, FieldPath, Map, Result, TranscodeError,
    TranscodeOptions, TypeTag, Value, WireDocument, WireMap, WireNode,
};
use serde_json::{Map as JsonMap, Value as JsonValue};

// Smallest f64 above i64::MAX; every whole float below it (and >= i64::MIN) fits.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;
const I64_LOWER_BOUND: f64 = -9_223_372_036_854_775_808.0;

/// Encode a plain document into a wire document
pub fn encode_document(doc: &Document, options: &TranscodeOptions) -> Result<WireDocument> {
    let mut fields = WireDocument::new();
    for (key, value) in doc {
        let node = encode_value(value, &FieldPath::root(key), options)?;
        fields.insert(key.clone(), node);
    }
    Ok(fields)
}

/// Encode a plain JSON object into a wire JSON object
pub fn encode_json_document(
    doc: &JsonMap<String, JsonValue>,
    options: &TranscodeOptions,
) -> Result<JsonMap<String, JsonValue>> {
    let plain = document_from_json(doc)?;
    let wire = encode_document(&plain, options)?;
    Ok(wire_map_to_json(&wire))
}

/// Encode a single plain value found at `path`
pub fn encode_value(value: &Value, path: &FieldPath, options: &TranscodeOptions) -> Result<WireNode> {
    if path.depth() > options.max_depth {
        return Err(TranscodeError::DepthExceeded {
            path: path.clone(),
            max_depth: options.max_depth,
        });
    }

    match value {
        Value::Null => Ok(WireNode::Null),
        Value::Bool(b) => Ok(WireNode::Boolean(*b)),
        Value::Int(i) => Ok(WireNode::Integer(*i)),
        Value::Float(f) => encode_float(*f, path),
        Value::String(s) => Ok(classify_string(s)),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| encode_value(item, &path.index(i), options))
            .collect::<Result<Vec<_>>>()
            .map(WireNode::Array),
        Value::Object(obj) => encode_object(obj, path, options),
    }
}

/// Pick the wire type for a plain string
///
/// First match wins: bytes, then timestamp, then string.
pub fn classify_string(s: &str) -> WireNode {
    if is_strict_base64(s) {
        WireNode::Bytes(s.to_string())
    } else if is_rfc3339(s) {
        WireNode::Timestamp(s.to_string())
    } else {
        WireNode::String(s.to_string())
    }
}

/// Encode a float, using `integerValue` when the fraction is zero
fn encode_float(f: f64, path: &FieldPath) -> Result<WireNode> {
    if !f.is_finite() {
        return Err(TranscodeError::Unrepresentable {
            path: path.clone(),
            reason: format!("{} is not a finite number", f),
        });
    }

    if f.fract() == 0.0 && (I64_LOWER_BOUND..I64_UPPER_BOUND).contains(&f) {
        Ok(WireNode::Integer(f as i64))
    } else {
        Ok(WireNode::Double(f))
    }
}

/// Encode an object, refusing objects that already look wire-encoded
fn encode_object(obj: &Map, path: &FieldPath, options: &TranscodeOptions) -> Result<WireNode> {
    if let Some(tag) = obj.keys().find_map(|k| TypeTag::parse(k)) {
        return Err(TranscodeError::Ambiguity {
            path: path.clone(),
            key: tag,
        });
    }

    let mut fields = WireMap::new();
    for (key, value) in obj {
        let node = encode_value(value, &path.nested_child(key), options)?;
        fields.insert(key.clone(), node);
    }
    Ok(WireNode::Map(fields))
}
