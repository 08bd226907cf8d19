//! Firestore type tags
//!
//! The fixed, process-wide set of type tags a wire node may carry. The set is
//! closed: `referenceValue` and `geoPointValue` belong to the Firestore
//! vocabulary but are not supported and never parse.

use std::fmt;

/// Supported Firestore value type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    /// `nullValue`
    Null,
    /// `booleanValue`
    Boolean,
    /// `integerValue`
    Integer,
    /// `doubleValue`
    Double,
    /// `timestampValue`
    Timestamp,
    /// `stringValue`
    String,
    /// `bytesValue`
    Bytes,
    /// `arrayValue`
    Array,
    /// `mapValue`
    Map,
}

/// Tags that exist in the Firestore vocabulary but are not implemented
pub const RESERVED_TAGS: &[&str] = &["referenceValue", "geoPointValue"];

/// Key holding the element list inside an `arrayValue` payload
pub const ARRAY_VALUES_KEY: &str = "values";

/// Key holding the field map inside a `mapValue` payload
pub const MAP_FIELDS_KEY: &str = "fields";

impl TypeTag {
    /// Every supported tag, in wire vocabulary order
    pub const ALL: [TypeTag; 9] = [
        TypeTag::Null,
        TypeTag::Boolean,
        TypeTag::Integer,
        TypeTag::Double,
        TypeTag::Timestamp,
        TypeTag::String,
        TypeTag::Bytes,
        TypeTag::Array,
        TypeTag::Map,
    ];

    /// Wire name of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Null => "nullValue",
            TypeTag::Boolean => "booleanValue",
            TypeTag::Integer => "integerValue",
            TypeTag::Double => "doubleValue",
            TypeTag::Timestamp => "timestampValue",
            TypeTag::String => "stringValue",
            TypeTag::Bytes => "bytesValue",
            TypeTag::Array => "arrayValue",
            TypeTag::Map => "mapValue",
        }
    }

    /// Parse a wire name (case-sensitive)
    pub fn parse(s: &str) -> Option<TypeTag> {
        TypeTag::ALL.iter().copied().find(|tag| tag.as_str() == s)
    }

    /// Check whether a key names one of the reserved, unsupported tags
    pub fn is_reserved(s: &str) -> bool {
        RESERVED_TAGS.contains(&s)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a key collides with a supported type tag
pub fn is_type_tag(key: &str) -> bool {
    TypeTag::parse(key).is_some()
}
