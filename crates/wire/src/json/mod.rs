//! JSON transcoding between plain documents and Firestore wire documents
//!
//! - `decode`: wire → plain, validating every wrapper on the way
//! - `encode`: plain → wire, inferring the wire type of every value
//! - `classify`: the bytes/timestamp rules both directions share

mod classify;
mod decode;
mod encode;

pub use classify::{check_strict_base64, is_rfc3339, is_strict_base64, parse_rfc3339};
pub use decode::{decode_document, decode_json_document, decode_node, decode_wire_document};
pub use encode::{classify_string, encode_document, encode_json_document, encode_value};
