//! Direction-agnostic conversion
//!
//! Nothing in a document says which way it should be converted. In
//! [`Direction::Auto`] the processor assumes a Firestore document first and
//! falls back to encoding a plain one:
//!
//! 1. decode; on success the document was wire-encoded
//! 2. otherwise encode; on success the document was plain
//! 3. otherwise report both failures as [`ConvertError::Undetermined`]
//!
//! A document valid both ways is always decoded.

use crate::error::ConvertError;
use firestore_json_core::TranscodeOptions;
use firestore_json_wire::{decode_json_document, encode_json_document};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Which way to convert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Try decoding, then encoding
    #[default]
    Auto,
    /// Firestore document → plain JSON
    Decode,
    /// Plain JSON → Firestore document
    Encode,
}

impl Direction {
    /// Lowercase name, as accepted by [`Direction::from_str`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Auto => "auto",
            Direction::Decode => "decode",
            Direction::Encode => "encode",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Direction::Auto),
            "decode" => Ok(Direction::Decode),
            "encode" => Ok(Direction::Encode),
            other => Err(format!(
                "unknown direction '{}', expected auto, decode or encode",
                other
            )),
        }
    }
}

/// A converted document and the direction that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Either [`Direction::Decode`] or [`Direction::Encode`], never `Auto`
    pub direction: Direction,
    /// The converted document
    pub document: Map<String, Value>,
}

/// Converts whole documents using shared transcoder options
#[derive(Debug, Clone, Default)]
pub struct Processor {
    options: TranscodeOptions,
}

impl Processor {
    /// Processor that transcodes with `options`
    pub fn new(options: TranscodeOptions) -> Self {
        Self { options }
    }

    /// Options every conversion runs with
    pub fn options(&self) -> &TranscodeOptions {
        &self.options
    }

    /// Convert in whichever direction applies
    pub fn convert(&self, doc: &Map<String, Value>) -> Result<Conversion, ConvertError> {
        self.convert_with(doc, Direction::Auto)
    }

    /// Strip Firestore type wrappers
    pub fn convert_from_firestore(&self, doc: &Map<String, Value>) -> Result<Map<String, Value>, ConvertError> {
        decode_json_document(doc, &self.options).map_err(ConvertError::Decode)
    }

    /// Wrap a plain document in Firestore type wrappers
    pub fn convert_to_firestore(&self, doc: &Map<String, Value>) -> Result<Map<String, Value>, ConvertError> {
        encode_json_document(doc, &self.options).map_err(ConvertError::Encode)
    }

    /// Convert in the given direction
    pub fn convert_with(
        &self,
        doc: &Map<String, Value>,
        direction: Direction,
    ) -> Result<Conversion, ConvertError> {
        match direction {
            Direction::Decode => self.convert_from_firestore(doc).map(|document| Conversion {
                direction: Direction::Decode,
                document,
            }),
            Direction::Encode => self.convert_to_firestore(doc).map(|document| Conversion {
                direction: Direction::Encode,
                document,
            }),
            Direction::Auto => self.convert_auto(doc),
        }
    }

    fn convert_auto(&self, doc: &Map<String, Value>) -> Result<Conversion, ConvertError> {
        let decode_err = match decode_json_document(doc, &self.options) {
            Ok(document) => {
                debug!(fields = doc.len(), "document decoded from the Firestore format");
                return Ok(Conversion {
                    direction: Direction::Decode,
                    document,
                });
            }
            Err(e) => e,
        };

        warn!(
            error = %decode_err,
            "document can't be decoded from the Firestore format, trying to encode it instead"
        );

        match encode_json_document(doc, &self.options) {
            Ok(document) => {
                debug!(fields = doc.len(), "document encoded into the Firestore format");
                Ok(Conversion {
                    direction: Direction::Encode,
                    document,
                })
            }
            Err(encode_err) => Err(ConvertError::Undetermined {
                decode: decode_err,
                encode: encode_err,
            }),
        }
    }
}
