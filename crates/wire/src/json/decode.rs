//! Decoding Firestore wire documents
//!
//! Walks raw JSON (the external boundary) and builds a validated
//! [`WireNode`] tree, then strips the wrappers to plain values. Every node
//! must be a single-key object whose key is a supported type tag:
//!
//! - `nullValue`: payload is literally `null`
//! - `booleanValue` / `doubleValue` / `stringValue`: payload type must match
//! - `integerValue`: payload is a decimal string
//! - `bytesValue`: payload is padded, standard-alphabet base64
//! - `timestampValue`: payload is an RFC 3339 string
//! - `arrayValue`: payload is `{"values": [...]}`
//! - `mapValue`: payload is `{"fields": {...}}`
//!
//! The first violation aborts the whole decode.

use super::classify::{check_strict_base64, parse_rfc3339};
use firestore_json_core::{
    wire_document_into_plain, Document, FieldPath, Result, TranscodeError, TranscodeOptions,
    TypeTag, WireDocument, WireMap, WireNode, ARRAY_VALUES_KEY, MAP_FIELDS_KEY,
};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::num::IntErrorKind;

/// Decode a wire document into a plain document
pub fn decode_document(doc: &JsonMap<String, JsonValue>, options: &TranscodeOptions) -> Result<Document> {
    decode_wire_document(doc, options).map(wire_document_into_plain)
}

/// Validate a wire document without stripping the wrappers
pub fn decode_wire_document(
    doc: &JsonMap<String, JsonValue>,
    options: &TranscodeOptions,
) -> Result<WireDocument> {
    let mut fields = WireDocument::new();
    for (key, raw) in doc {
        let node = decode_node(raw, &FieldPath::root(key), options)?;
        fields.insert(key.clone(), node);
    }
    Ok(fields)
}

/// Decode a wire document into a plain JSON object
pub fn decode_json_document(
    doc: &JsonMap<String, JsonValue>,
    options: &TranscodeOptions,
) -> Result<JsonMap<String, JsonValue>> {
    let plain = decode_document(doc, options)?;
    Ok(firestore_json_core::document_to_json(&plain))
}

/// Decode a single wire node found at `path`
pub fn decode_node(raw: &JsonValue, path: &FieldPath, options: &TranscodeOptions) -> Result<WireNode> {
    if path.depth() > options.max_depth {
        return Err(TranscodeError::DepthExceeded {
            path: path.clone(),
            max_depth: options.max_depth,
        });
    }

    let wrapper = raw.as_object().ok_or_else(|| {
        TranscodeError::structural(
            path,
            format!("expected a type wrapper object, found {}", json_type_name(raw)),
        )
    })?;

    let (key, payload) = match wrapper.len() {
        0 => return Err(TranscodeError::structural(path, "it contains no keys")),
        1 => match wrapper.iter().next() {
            Some(entry) => entry,
            None => return Err(TranscodeError::structural(path, "it contains no keys")),
        },
        n => {
            return Err(TranscodeError::structural(
                path,
                format!("it contains {} type keys, expected exactly one", n),
            ))
        }
    };

    let tag = TypeTag::parse(key).ok_or_else(|| TranscodeError::UnsupportedType {
        path: path.clone(),
        found: if TypeTag::is_reserved(key) {
            format!("{} (not implemented)", key)
        } else {
            key.clone()
        },
    })?;

    let path = path.child(tag.as_str());
    match tag {
        TypeTag::Null => {
            if payload.is_null() {
                Ok(WireNode::Null)
            } else {
                Err(mismatch(&path, tag, "null"))
            }
        }
        TypeTag::Boolean => payload
            .as_bool()
            .map(WireNode::Boolean)
            .ok_or_else(|| mismatch(&path, tag, "boolean")),
        TypeTag::Integer => decode_integer(payload, &path).map(WireNode::Integer),
        TypeTag::Double => payload
            .as_f64()
            .map(WireNode::Double)
            .ok_or_else(|| mismatch(&path, tag, "number")),
        TypeTag::String => payload
            .as_str()
            .map(|s| WireNode::String(s.to_string()))
            .ok_or_else(|| mismatch(&path, tag, "string")),
        TypeTag::Bytes => {
            let s = payload.as_str().ok_or_else(|| mismatch(&path, tag, "string"))?;
            check_strict_base64(s).map_err(|reason| TranscodeError::format(&path, tag, reason))?;
            Ok(WireNode::Bytes(s.to_string()))
        }
        TypeTag::Timestamp => {
            let s = payload.as_str().ok_or_else(|| mismatch(&path, tag, "string"))?;
            parse_rfc3339(s).map_err(|reason| TranscodeError::format(&path, tag, reason))?;
            Ok(WireNode::Timestamp(s.to_string()))
        }
        TypeTag::Array => decode_array(payload, &path, options),
        TypeTag::Map => decode_map(payload, &path, options),
    }
}

/// Decode an `integerValue` payload
fn decode_integer(payload: &JsonValue, path: &FieldPath) -> Result<i64> {
    let s = payload
        .as_str()
        .ok_or_else(|| mismatch(path, TypeTag::Integer, "decimal string"))?;

    s.parse::<i64>().map_err(|e| {
        let reason = match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                format!("'{}' is out of the 64-bit integer range", s)
            }
            _ => format!("'{}' is not a number", s),
        };
        TranscodeError::format(path, TypeTag::Integer, reason)
    })
}

/// Decode an `arrayValue` payload: `{"values": [...]}`
fn decode_array(payload: &JsonValue, path: &FieldPath, options: &TranscodeOptions) -> Result<WireNode> {
    let wrapper = payload
        .as_object()
        .ok_or_else(|| mismatch(path, TypeTag::Array, "object"))?;

    let values = wrapper.get(ARRAY_VALUES_KEY).ok_or_else(|| {
        TranscodeError::structural(
            path,
            "'arrayValue' object does not contain an obligatory field - 'values'",
        )
    })?;

    let path = path.child(ARRAY_VALUES_KEY);
    let elements = values
        .as_array()
        .ok_or_else(|| mismatch(&path, TypeTag::Array, "array"))?;

    elements
        .iter()
        .enumerate()
        .map(|(i, element)| decode_node(element, &path.index(i), options))
        .collect::<Result<Vec<_>>>()
        .map(WireNode::Array)
}

/// Decode a `mapValue` payload: `{"fields": {...}}`
fn decode_map(payload: &JsonValue, path: &FieldPath, options: &TranscodeOptions) -> Result<WireNode> {
    let wrapper = payload
        .as_object()
        .ok_or_else(|| mismatch(path, TypeTag::Map, "object"))?;

    let fields = wrapper.get(MAP_FIELDS_KEY).ok_or_else(|| {
        TranscodeError::structural(
            path,
            "'mapValue' object does not contain an obligatory field - 'fields'",
        )
    })?;

    let path = path.child(MAP_FIELDS_KEY);
    let fields = fields
        .as_object()
        .ok_or_else(|| mismatch(&path, TypeTag::Map, "object"))?;

    let mut decoded = WireMap::new();
    for (key, raw) in fields {
        let node = decode_node(raw, &path.nested_child(key), options)?;
        decoded.insert(key.clone(), node);
    }
    Ok(WireNode::Map(decoded))
}

fn mismatch(path: &FieldPath, tag: TypeTag, expected: &'static str) -> TranscodeError {
    TranscodeError::TypeMismatch {
        path: path.clone(),
        tag,
        expected,
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firestore_json_core::Value;
    use serde_json::json;

    fn decode(raw: JsonValue) -> Result<Document> {
        let doc = raw.as_object().expect("test document must be an object").clone();
        decode_document(&doc, &TranscodeOptions::default())
    }

    fn decode_err(raw: JsonValue) -> TranscodeError {
        decode(raw).expect_err("decode should fail")
    }

    // === Scalars ===

    #[test]
    fn test_decode_end_to_end_scalars() {
        let doc = decode(json!({"age": {"integerValue": "30"}, "name": {"stringValue": "Ann"}})).unwrap();
        assert_eq!(doc.get("age"), Some(&Value::Int(30)));
        assert_eq!(doc.get("name"), Some(&Value::String("Ann".into())));
    }

    #[test]
    fn test_decode_null() {
        let doc = decode(json!({"n": {"nullValue": null}})).unwrap();
        assert_eq!(doc.get("n"), Some(&Value::Null));
    }

    #[test]
    fn test_decode_null_with_payload_rejected() {
        let err = decode_err(json!({"n": {"nullValue": 0}}));
        assert!(matches!(err, TranscodeError::TypeMismatch { tag: TypeTag::Null, .. }));
        assert_eq!(err.path().as_str(), "n/nullValue");
    }

    #[test]
    fn test_decode_boolean() {
        let doc = decode(json!({"b": {"booleanValue": false}})).unwrap();
        assert_eq!(doc.get("b"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_decode_boolean_wrong_type() {
        let err = decode_err(json!({"b": {"booleanValue": "true"}}));
        assert!(matches!(err, TranscodeError::TypeMismatch { tag: TypeTag::Boolean, .. }));
        assert!(err.to_string().contains("booleanValue"));
    }

    #[test]
    fn test_decode_double() {
        let doc = decode(json!({"d": {"doubleValue": 5.5}})).unwrap();
        assert_eq!(doc.get("d"), Some(&Value::Float(5.5)));
    }

    #[test]
    fn test_decode_double_from_integer_literal() {
        let doc = decode(json!({"d": {"doubleValue": 2}})).unwrap();
        assert_eq!(doc.get("d"), Some(&Value::Float(2.0)));
    }

    #[test]
    fn test_decode_double_as_string_rejected() {
        let err = decode_err(json!({"d": {"doubleValue": "5.5"}}));
        assert!(matches!(err, TranscodeError::TypeMismatch { tag: TypeTag::Double, .. }));
    }

    #[test]
    fn test_decode_string_wrong_type() {
        let err = decode_err(json!({"s": {"stringValue": 1}}));
        assert!(matches!(err, TranscodeError::TypeMismatch { tag: TypeTag::String, .. }));
    }

    // === Integers ===

    #[test]
    fn test_decode_integer_negative() {
        let doc = decode(json!({"i": {"integerValue": "-42"}})).unwrap();
        assert_eq!(doc.get("i"), Some(&Value::Int(-42)));
    }

    #[test]
    fn test_decode_integer_extremes() {
        let doc = decode(json!({
            "max": {"integerValue": "9223372036854775807"},
            "min": {"integerValue": "-9223372036854775808"}
        }))
        .unwrap();
        assert_eq!(doc.get("max"), Some(&Value::Int(i64::MAX)));
        assert_eq!(doc.get("min"), Some(&Value::Int(i64::MIN)));
    }

    #[test]
    fn test_decode_integer_not_a_number() {
        let err = decode_err(json!({"i": {"integerValue": "abc"}}));
        assert!(matches!(err, TranscodeError::Format { tag: TypeTag::Integer, .. }));
        assert!(err.to_string().contains("not a number"));
        assert_eq!(err.path().as_str(), "i/integerValue");
    }

    #[test]
    fn test_decode_integer_fraction_rejected() {
        let err = decode_err(json!({"i": {"integerValue": "1.5"}}));
        assert!(matches!(err, TranscodeError::Format { .. }));
    }

    #[test]
    fn test_decode_integer_overflow() {
        let err = decode_err(json!({"i": {"integerValue": "9223372036854775808"}}));
        assert!(err.to_string().contains("out of the 64-bit integer range"));
    }

    #[test]
    fn test_decode_integer_as_number_rejected() {
        let err = decode_err(json!({"i": {"integerValue": 30}}));
        assert!(matches!(
            err,
            TranscodeError::TypeMismatch { tag: TypeTag::Integer, expected: "decimal string", .. }
        ));
    }

    // === Bytes and timestamps ===

    #[test]
    fn test_decode_bytes_keeps_base64_string() {
        let doc = decode(json!({"blob": {"bytesValue": "SGVsbG8="}})).unwrap();
        assert_eq!(doc.get("blob"), Some(&Value::String("SGVsbG8=".into())));
    }

    #[test]
    fn test_decode_bytes_invalid_base64() {
        let err = decode_err(json!({"blob": {"bytesValue": "!!invalid!!="}}));
        assert!(matches!(err, TranscodeError::Format { tag: TypeTag::Bytes, .. }));
        assert_eq!(err.path().as_str(), "blob/bytesValue");
    }

    #[test]
    fn test_decode_bytes_unpadded_rejected() {
        let err = decode_err(json!({"blob": {"bytesValue": "abcd"}}));
        assert!(matches!(err, TranscodeError::Format { tag: TypeTag::Bytes, .. }));
    }

    #[test]
    fn test_decode_timestamp() {
        let doc = decode(json!({"at": {"timestampValue": "2024-05-01T12:30:00Z"}})).unwrap();
        assert_eq!(doc.get("at"), Some(&Value::String("2024-05-01T12:30:00Z".into())));
    }

    #[test]
    fn test_decode_timestamp_malformed() {
        let err = decode_err(json!({"at": {"timestampValue": "yesterday"}}));
        assert!(matches!(err, TranscodeError::Format { tag: TypeTag::Timestamp, .. }));
    }

    #[test]
    fn test_decode_timestamp_non_canonical_rejected() {
        for ts in ["2024-05-01 12:30:00Z", "2024-05-01t12:30:00z"] {
            let err = decode_err(json!({"a": {"timestampValue": ts}}));
            assert!(matches!(err, TranscodeError::Format { tag: TypeTag::Timestamp, .. }));
            assert_eq!(err.path().as_str(), "a/timestampValue");
        }
    }

    // === Wrapper structure ===

    #[test]
    fn test_decode_empty_wrapper_rejected() {
        let err = decode_err(json!({"x": {}}));
        assert!(matches!(err, TranscodeError::Structural { .. }));
        assert!(err.to_string().contains("no keys"));
    }

    #[test]
    fn test_decode_two_keys_rejected() {
        let err = decode_err(json!({"x": {"stringValue": "a", "integerValue": "1"}}));
        assert!(matches!(err, TranscodeError::Structural { .. }));
        assert!(err.to_string().contains("expected exactly one"));
    }

    #[test]
    fn test_decode_two_keys_rejected_when_nested() {
        let err = decode_err(json!({
            "outer": {"mapValue": {"fields": {
                "inner": {"arrayValue": {"values": [
                    {"stringValue": "a", "booleanValue": true}
                ]}}
            }}}
        }));
        assert!(matches!(err, TranscodeError::Structural { .. }));
        assert_eq!(
            err.path().as_str(),
            "outer/mapValue/fields/inner/arrayValue/values[0]"
        );
    }

    #[test]
    fn test_decode_unknown_tag_rejected() {
        let err = decode_err(json!({"x": {"BOGUS": 1}}));
        assert!(matches!(err, TranscodeError::UnsupportedType { ref found, .. } if found == "BOGUS"));
    }

    #[test]
    fn test_decode_reserved_tags_rejected() {
        let err = decode_err(json!({"ref": {"referenceValue": "projects/p/databases/d/documents/c/x"}}));
        assert!(matches!(err, TranscodeError::UnsupportedType { .. }));
        let err = decode_err(json!({"geo": {"geoPointValue": {"latitude": 1.0, "longitude": 2.0}}}));
        assert!(err.to_string().contains("geoPointValue (not implemented)"));
    }

    #[test]
    fn test_decode_bare_scalar_field_rejected() {
        let err = decode_err(json!({"age": 30}));
        assert!(matches!(err, TranscodeError::Structural { .. }));
        assert_eq!(err.path().as_str(), "age");
    }

    // === Arrays ===

    #[test]
    fn test_decode_array() {
        let doc = decode(json!({"tags": {"arrayValue": {"values": [
            {"stringValue": "a"},
            {"integerValue": "2"},
            {"nullValue": null}
        ]}}}))
        .unwrap();
        assert_eq!(
            doc.get("tags"),
            Some(&Value::Array(vec![Value::String("a".into()), Value::Int(2), Value::Null]))
        );
    }

    #[test]
    fn test_decode_array_missing_values() {
        let err = decode_err(json!({"tags": {"arrayValue": {}}}));
        assert!(matches!(err, TranscodeError::Structural { .. }));
        assert!(err.to_string().contains("'values'"));
        assert_eq!(err.path().as_str(), "tags/arrayValue");
    }

    #[test]
    fn test_decode_array_values_not_array() {
        let err = decode_err(json!({"tags": {"arrayValue": {"values": {}}}}));
        assert!(matches!(err, TranscodeError::TypeMismatch { tag: TypeTag::Array, .. }));
        assert_eq!(err.path().as_str(), "tags/arrayValue/values");
    }

    #[test]
    fn test_decode_array_element_not_object() {
        let err = decode_err(json!({"tags": {"arrayValue": {"values": [{"stringValue": "a"}, "b"]}}}));
        assert!(matches!(err, TranscodeError::Structural { .. }));
        assert_eq!(err.path().as_str(), "tags/arrayValue/values[1]");
    }

    // === Maps ===

    #[test]
    fn test_decode_map() {
        let doc = decode(json!({"user": {"mapValue": {"fields": {
            "city": {"stringValue": "Oslo"},
            "zip": {"integerValue": "150"}
        }}}}))
        .unwrap();
        let user = doc.get("user").and_then(Value::as_object).unwrap();
        assert_eq!(user.get("city"), Some(&Value::String("Oslo".into())));
        assert_eq!(user.get("zip"), Some(&Value::Int(150)));
    }

    #[test]
    fn test_decode_map_missing_fields() {
        let err = decode_err(json!({"user": {"mapValue": {}}}));
        assert!(matches!(err, TranscodeError::Structural { .. }));
        assert!(err.to_string().contains("'fields'"));
        assert_eq!(err.path().as_str(), "user/mapValue");
    }

    #[test]
    fn test_decode_map_payload_not_object() {
        let err = decode_err(json!({"user": {"mapValue": []}}));
        assert!(matches!(err, TranscodeError::TypeMismatch { tag: TypeTag::Map, .. }));
    }

    #[test]
    fn test_decode_path_fidelity() {
        let err = decode_err(json!({
            "a": {"mapValue": {"fields": {"b": {"arrayValue": {"values": [{"BOGUS": 1}]}}}}}
        }));
        assert!(err.to_string().contains("a/mapValue/fields/b/arrayValue/values[0]"));
    }

    #[test]
    fn test_decode_error_deep_in_scalar_path() {
        let err = decode_err(json!({
            "a": {"mapValue": {"fields": {"n": {"integerValue": "x"}}}}
        }));
        assert_eq!(err.path().as_str(), "a/mapValue/fields/n/integerValue");
    }

    // === Depth ===

    #[test]
    fn test_decode_depth_bound() {
        let raw = json!({"a": {"arrayValue": {"values": [
            {"arrayValue": {"values": [{"nullValue": null}]}}
        ]}}});
        let doc = raw.as_object().unwrap().clone();

        assert!(decode_document(&doc, &TranscodeOptions::new().max_depth(2)).is_ok());
        let err = decode_document(&doc, &TranscodeOptions::new().max_depth(1)).unwrap_err();
        assert!(matches!(err, TranscodeError::DepthExceeded { max_depth: 1, .. }));
    }

    // === Wire tree ===

    #[test]
    fn test_decode_wire_document_keeps_tags() {
        let raw = json!({"at": {"timestampValue": "2024-05-01T12:30:00Z"}, "b": {"bytesValue": "QQ=="}});
        let wire = decode_wire_document(raw.as_object().unwrap(), &TranscodeOptions::default()).unwrap();
        assert_eq!(wire.get("at").map(WireNode::tag), Some(TypeTag::Timestamp));
        assert_eq!(wire.get("b").map(WireNode::tag), Some(TypeTag::Bytes));
    }

    #[test]
    fn test_decode_json_document() {
        let raw = json!({"tags": {"arrayValue": {"values": [{"doubleValue": 1.5}]}}});
        let out = decode_json_document(raw.as_object().unwrap(), &TranscodeOptions::default()).unwrap();
        assert_eq!(JsonValue::Object(out), json!({"tags": [1.5]}));
    }

    #[test]
    fn test_decode_empty_document() {
        assert!(decode(json!({})).unwrap().is_empty());
    }
}
