//! String classification shared by both directions
//!
//! The same rules validate `bytesValue` / `timestampValue` payloads when
//! decoding and pick the wire type for a plain string when encoding, so a
//! string the encoder classifies as bytes always decodes again.
//!
//! ## Bytes policy
//!
//! One canonical policy: standard alphabet, canonical `=` padding, no stray
//! trailing bits, and at least one padding character present. Without the
//! last rule every four-letter word would be "valid base64".

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use chrono::{DateTime, FixedOffset};

const STRICT_PADDED: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical)
        .with_decode_allow_trailing_bits(false),
);

/// Validate a string against the bytes policy, returning the failure reason
pub fn check_strict_base64(s: &str) -> Result<(), String> {
    if !s.ends_with('=') {
        return Err(format!(
            "'{}' should be padded to be considered a base64 encoded byte value",
            s
        ));
    }
    STRICT_PADDED
        .decode(s)
        .map(|_| ())
        .map_err(|e| format!("invalid base64: {}", e))
}

/// Check a string against the bytes policy
pub fn is_strict_base64(s: &str) -> bool {
    check_strict_base64(s).is_ok()
}

/// Parse an RFC 3339 timestamp
///
/// Only the canonical form is accepted: an uppercase `T` between date and
/// time, and a zone of `Z` or `±hh:mm`. chrono alone would also take a space
/// separator and lowercase letters.
pub fn parse_rfc3339(s: &str) -> Result<DateTime<FixedOffset>, String> {
    if !has_canonical_shape(s) {
        return Err(format!("'{}' is not a canonical RFC 3339 timestamp", s));
    }
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("invalid RFC 3339 timestamp: {}", e))
}

fn has_canonical_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 20 || bytes[10] != b'T' {
        return false;
    }
    if bytes.ends_with(b"Z") {
        return true;
    }
    match &bytes[bytes.len() - 6..] {
        [sign, h1, h2, b':', m1, m2] => {
            matches!(sign, b'+' | b'-')
                && [h1, h2, m1, m2].iter().all(|d| d.is_ascii_digit())
        }
        _ => false,
    }
}

/// Check whether a string is an RFC 3339 timestamp
pub fn is_rfc3339(s: &str) -> bool {
    parse_rfc3339(s).is_ok()
}
