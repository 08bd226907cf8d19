//! Auto-detection of the conversion direction.

use firestore_json::prelude::*;
use firestore_json::ConvertError;

#[test]
fn wire_documents_are_decoded() {
    let out = convert(&json!({"ok": {"booleanValue": false}})).unwrap();
    assert_eq!(out.direction, Direction::Decode);
    assert_eq!(serde_json::Value::Object(out.document), json!({"ok": false}));
}

#[test]
fn plain_documents_are_encoded() {
    let out = convert(&json!({"ok": false})).unwrap();
    assert_eq!(out.direction, Direction::Encode);
    assert_eq!(
        serde_json::Value::Object(out.document),
        json!({"ok": {"booleanValue": false}})
    );
}

#[test]
fn documents_neither_way_report_both_reasons() {
    let err = convert(&json!({"x": {"integerValue": "one"}})).unwrap_err();
    match err {
        Error::Convert(ConvertError::Undetermined { decode, encode }) => {
            assert_eq!(decode.code(), "Format");
            assert_eq!(encode.code(), "Ambiguity");
        }
        other => panic!("expected Undetermined, got {:?}", other),
    }
}

#[test]
fn forced_direction_skips_detection() {
    let processor = Processor::new(TranscodeOptions::default());
    let doc = json!({"ok": {"booleanValue": false}});
    let doc = doc.as_object().unwrap();

    let err = processor.convert_with(doc, Direction::Encode).unwrap_err();
    assert!(matches!(err, ConvertError::Encode(_)));
}
