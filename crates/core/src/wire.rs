//! Firestore wire nodes
//!
//! `WireNode` is the validated, typed form of a Firestore REST value. Every
//! node renders as a single-key object whose key is its type tag:
//!
//! | Variant | JSON Encoding |
//! |---------|--------------|
//! | Null | `{"nullValue": null}` |
//! | Boolean | `{"booleanValue": true}` |
//! | Integer | `{"integerValue": "42"}` (decimal string) |
//! | Double | `{"doubleValue": 4.2}` (number) |
//! | Timestamp | `{"timestampValue": "2024-01-01T00:00:00Z"}` |
//! | String | `{"stringValue": "..."}` |
//! | Bytes | `{"bytesValue": "<base64>"}` |
//! | Array | `{"arrayValue": {"values": [...]}}` |
//! | Map | `{"mapValue": {"fields": {...}}}` |
//!
//! Constructing a `WireNode` from raw JSON is the decoder's job; once built,
//! stripping it back to a plain [`Value`] cannot fail.

use crate::tag::{TypeTag, ARRAY_VALUES_KEY, MAP_FIELDS_KEY};
use crate::value::{Document, Value};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Field map inside a `mapValue`
pub type WireMap = BTreeMap<String, WireNode>;

/// A wire document: field name to wire node
pub type WireDocument = BTreeMap<String, WireNode>;

/// Typed Firestore value
#[derive(Debug, Clone, PartialEq)]
pub enum WireNode {
    /// `nullValue`
    Null,
    /// `booleanValue`
    Boolean(bool),
    /// `integerValue`, carried on the wire as a decimal string
    Integer(i64),
    /// `doubleValue`, carried on the wire as a JSON number
    Double(f64),
    /// `timestampValue`, an RFC 3339 string
    Timestamp(String),
    /// `stringValue`
    String(String),
    /// `bytesValue`, a base64 string
    Bytes(String),
    /// `arrayValue`
    Array(Vec<WireNode>),
    /// `mapValue`
    Map(WireMap),
}

impl WireNode {
    /// The node's type tag
    pub fn tag(&self) -> TypeTag {
        match self {
            WireNode::Null => TypeTag::Null,
            WireNode::Boolean(_) => TypeTag::Boolean,
            WireNode::Integer(_) => TypeTag::Integer,
            WireNode::Double(_) => TypeTag::Double,
            WireNode::Timestamp(_) => TypeTag::Timestamp,
            WireNode::String(_) => TypeTag::String,
            WireNode::Bytes(_) => TypeTag::Bytes,
            WireNode::Array(_) => TypeTag::Array,
            WireNode::Map(_) => TypeTag::Map,
        }
    }

    /// Strip the type wrappers, recursively
    pub fn into_value(self) -> Value {
        match self {
            WireNode::Null => Value::Null,
            WireNode::Boolean(b) => Value::Bool(b),
            WireNode::Integer(i) => Value::Int(i),
            WireNode::Double(f) => Value::Float(f),
            WireNode::Timestamp(s) | WireNode::String(s) | WireNode::Bytes(s) => Value::String(s),
            WireNode::Array(values) => {
                Value::Array(values.into_iter().map(WireNode::into_value).collect())
            }
            WireNode::Map(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, v.into_value()))
                    .collect(),
            ),
        }
    }

    /// Render as Firestore REST JSON
    pub fn to_json(&self) -> serde_json::Value {
        let payload = match self {
            WireNode::Null => serde_json::Value::Null,
            WireNode::Boolean(b) => serde_json::Value::Bool(*b),
            WireNode::Integer(i) => serde_json::Value::String(i.to_string()),
            // Non-finite doubles are never produced by the encoder or decoder
            WireNode::Double(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            WireNode::Timestamp(s) | WireNode::String(s) | WireNode::Bytes(s) => {
                serde_json::Value::String(s.clone())
            }
            WireNode::Array(values) => {
                let mut wrapper = serde_json::Map::new();
                wrapper.insert(
                    ARRAY_VALUES_KEY.to_string(),
                    serde_json::Value::Array(values.iter().map(WireNode::to_json).collect()),
                );
                serde_json::Value::Object(wrapper)
            }
            WireNode::Map(fields) => {
                let mut wrapper = serde_json::Map::new();
                wrapper.insert(
                    MAP_FIELDS_KEY.to_string(),
                    serde_json::Value::Object(wire_map_to_json(fields)),
                );
                serde_json::Value::Object(wrapper)
            }
        };

        let mut node = serde_json::Map::new();
        node.insert(self.tag().as_str().to_string(), payload);
        serde_json::Value::Object(node)
    }
}

/// Render a field map (or a whole wire document) as a JSON object
pub fn wire_map_to_json(fields: &WireMap) -> serde_json::Map<String, serde_json::Value> {
    fields.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()
}

/// Strip every field of a wire document
pub fn wire_document_into_plain(doc: WireDocument) -> Document {
    doc.into_iter().map(|(k, v)| (k, v.into_value())).collect()
}

impl Serialize for WireNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
