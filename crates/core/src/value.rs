//! Plain value model
//!
//! This module defines the `Value` type for the plain side of a conversion:
//! ordinary JSON with no type wrappers.
//!
//! ## Contract
//!
//! - No implicit type coercions: `Int(1)` != `Float(1.0)`
//! - Bytes and timestamps are NOT distinct variants. On the plain side they
//!   are strings; "byte-ness" and "timestamp-ness" are classifications the
//!   encoder applies.
//! - Objects are sorted maps, so every rendering is deterministic.

use crate::error::{Result, TranscodeError};
use crate::path::FieldPath;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::BTreeMap;

/// String-keyed map of plain values
pub type Map = BTreeMap<String, Value>;

/// A plain document: field name to value
pub type Document = BTreeMap<String, Value>;

/// Plain JSON value
///
/// ## The Seven Types
///
/// 1. `Null` - JSON null
/// 2. `Bool` - Boolean true or false
/// 3. `Int` - 64-bit signed integer, never stored as a float
/// 4. `Float` - 64-bit IEEE-754 floating point
/// 5. `String` - UTF-8 string (also carries base64 bytes and timestamps)
/// 6. `Array` - Ordered sequence of values
/// 7. `Object` - String-keyed map of values
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// Boolean true or false
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit IEEE-754 floating point
    Float(f64),

    /// UTF-8 encoded string
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// String-keyed map of values
    Object(Map),
}

impl Value {
    /// Returns the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as array slice
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as object reference
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Convert a raw JSON value found at `path` into a plain value
    ///
    /// Integers that fit in `i64` become `Int` and fractional numbers become
    /// `Float`. An integer literal outside the `i64` range has no exact plain
    /// form and is an `Unrepresentable` error rather than a rounded float.
    pub fn from_json(json: &serde_json::Value, path: &FieldPath) -> Result<Value> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => number_from_json(n, path),
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Array(arr) => arr
                .iter()
                .enumerate()
                .map(|(i, v)| Value::from_json(v, &path.index(i)))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            serde_json::Value::Object(obj) => obj
                .iter()
                .map(|(k, v)| Ok((k.clone(), Value::from_json(v, &path.nested_child(k))?)))
                .collect::<Result<Map>>()
                .map(Value::Object),
        }
    }

    /// Convert into a raw JSON value
    ///
    /// Non-finite floats have no JSON form and become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(arr) => serde_json::Value::Array(arr.iter().map(Value::to_json).collect()),
            Value::Object(obj) => serde_json::Value::Object(
                obj.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

/// Convert a raw JSON object into a plain document
pub fn document_from_json(obj: &serde_json::Map<String, serde_json::Value>) -> Result<Document> {
    obj.iter()
        .map(|(k, v)| Ok((k.clone(), Value::from_json(v, &FieldPath::root(k))?)))
        .collect()
}

fn number_from_json(n: &serde_json::Number, path: &FieldPath) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Int(i));
    }
    if n.is_u64() {
        return Err(TranscodeError::Unrepresentable {
            path: path.clone(),
            reason: format!("integer {} is outside the 64-bit range", n),
        });
    }
    n.as_f64()
        .map(Value::Float)
        .ok_or_else(|| TranscodeError::Unrepresentable {
            path: path.clone(),
            reason: format!("{} is not a 64-bit float", n),
        })
}

/// Convert a plain document into a raw JSON object
pub fn document_to_json(doc: &Document) -> serde_json::Map<String, serde_json::Value> {
    doc.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

// Plain JSON rendering: no wrappers, keys in sorted order.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for v in arr {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
