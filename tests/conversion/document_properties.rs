//! Document-level behaviour through the one-call helpers.

use firestore_json::prelude::*;
use firestore_json::{TranscodeError, TypeTag};

#[test]
fn scenario_wire_to_plain_and_back() {
    let wire = json!({"age": {"integerValue": "30"}, "name": {"stringValue": "Ann"}});

    let plain = from_firestore(&wire).unwrap();
    assert_eq!(plain, json!({"age": 30, "name": "Ann"}));

    assert_eq!(to_firestore(&plain).unwrap(), wire);
}

#[test]
fn integer_and_whole_double_both_encode_as_integer() {
    assert_eq!(
        to_firestore(&json!({"a": 5, "b": 5.0, "c": 5.5})).unwrap(),
        json!({
            "a": {"integerValue": "5"},
            "b": {"integerValue": "5"},
            "c": {"doubleValue": 5.5}
        })
    );
}

#[test]
fn bytes_take_precedence_over_timestamps() {
    let out = to_firestore(&json!({
        "blob": "SGVsbG8=",
        "at": "2024-05-01T12:30:00Z",
        "text": "abcd"
    }))
    .unwrap();
    assert_eq!(out["blob"], json!({"bytesValue": "SGVsbG8="}));
    assert_eq!(out["at"], json!({"timestampValue": "2024-05-01T12:30:00Z"}));
    assert_eq!(out["text"], json!({"stringValue": "abcd"}));
}

#[test]
fn decode_error_carries_full_path() {
    let wire = json!({"a": {"mapValue": {"fields": {
        "b": {"arrayValue": {"values": [{"BOGUS": 1}]}}
    }}}});
    let err = from_firestore(&wire).unwrap_err();
    let path = err.path().unwrap().as_str().to_string();
    assert_eq!(path, "a/mapValue/fields/b/arrayValue/values[0]");
    assert!(err.to_string().contains("BOGUS"));
}

#[test]
fn wrappers_with_zero_or_two_keys_are_rejected() {
    for node in [
        json!({}),
        json!({"stringValue": "a", "nullValue": null}),
        json!({"arrayValue": {"values": [{}]}}),
        json!({"mapValue": {"fields": {"x": {"booleanValue": true, "stringValue": "y"}}}}),
    ] {
        let err = from_firestore(&json!({"field": node})).unwrap_err();
        assert!(matches!(err, Error::Transcode(TranscodeError::Structural { .. })));
    }
}

#[test]
fn missing_wrapper_keys_are_structural_errors() {
    let err = from_firestore(&json!({"a": {"arrayValue": {}}})).unwrap_err();
    assert!(err.to_string().contains("'values'"));

    let err = from_firestore(&json!({"m": {"mapValue": {}}})).unwrap_err();
    assert!(err.to_string().contains("'fields'"));
}

#[test]
fn already_encoded_objects_are_refused() {
    let err = to_firestore(&json!({"x": {"integerValue": "1"}})).unwrap_err();
    assert!(matches!(
        err,
        Error::Transcode(TranscodeError::Ambiguity {
            key: TypeTag::Integer,
            ..
        })
    ));
}

#[test]
fn reserved_tags_are_unsupported() {
    for tag in ["referenceValue", "geoPointValue"] {
        let err = from_firestore(&json!({"x": {tag: "projects/p"}})).unwrap_err();
        assert!(matches!(err, Error::Transcode(TranscodeError::UnsupportedType { .. })));
    }
}

#[test]
fn deep_nesting_is_bounded() {
    let mut plain = json!(1);
    for _ in 0..100 {
        plain = json!([plain]);
    }
    let err = to_firestore(&json!({"deep": plain})).unwrap_err();
    assert!(matches!(err, Error::Transcode(TranscodeError::DepthExceeded { max_depth: 64, .. })));
}

#[test]
fn nested_document_round_trips() {
    let plain = json!({
        "user": {
            "name": "Ann",
            "tags": ["a", "b"],
            "address": {"city": "Oslo", "zip": 150},
            "scores": [1.5, 2, null, true],
            "joined": "2021-03-04T05:06:07.890+01:00"
        },
        "empty": {},
        "none": []
    });
    let wire = to_firestore(&plain).unwrap();
    assert_eq!(from_firestore(&wire).unwrap(), plain);
}

#[test]
fn integers_beyond_64_bits_are_refused() {
    let err = to_firestore(&json!({"big": 18446744073709551615u64})).unwrap_err();
    assert!(matches!(err, Error::Transcode(TranscodeError::Unrepresentable { .. })));
    assert_eq!(err.path().unwrap().as_str(), "big");
}

#[test]
fn loose_timestamps_stay_strings() {
    let out = to_firestore(&json!({"at": "2024-05-01 12:30:00Z"})).unwrap();
    assert_eq!(out["at"], json!({"stringValue": "2024-05-01 12:30:00Z"}));
}
