//! Batch runs over real files.

use crate::common::{read_json, write_json};
use firestore_json::{BatchConverter, Direction, EngineConfig, EngineError};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn generate_converts_each_pair() {
    let dir = TempDir::new().unwrap();
    let wire = write_json(&dir, "wire.json", &json!({"n": {"integerValue": "-7"}}));
    let plain = write_json(&dir, "plain.json", &json!({"n": -7}));
    let out_a = dir.path().join("a.out.json");
    let out_b = dir.path().join("b.out.json");

    let report = BatchConverter::generate(vec![wire, plain], vec![out_a.clone(), out_b.clone()])
        .unwrap()
        .run(&mut std::io::sink());

    assert!(report.is_success());
    assert_eq!(read_json(&out_a), json!({"n": -7}));
    assert_eq!(read_json(&out_b), json!({"n": {"integerValue": "-7"}}));
}

#[test]
fn converting_twice_in_place_restores_the_file() {
    let dir = TempDir::new().unwrap();
    let original = json!({"tags": ["x"], "at": "2024-01-01T00:00:00Z"});
    let path = write_json(&dir, "doc.json", &original);

    for _ in 0..2 {
        let report = BatchConverter::generate(vec![path.clone()], vec![path.clone()])
            .unwrap()
            .run(&mut std::io::sink());
        assert!(report.is_success());
    }
    assert_eq!(read_json(&path), original);
}

#[test]
fn invalid_pairs_are_skipped_and_reported() {
    let dir = TempDir::new().unwrap();
    let good = write_json(&dir, "good.json", &json!({"a": 1}));
    let missing = dir.path().join("missing.json");

    let batch = BatchConverter::preview(vec![missing.clone(), good]).unwrap();
    let mut out = Vec::new();
    let report = batch.run(&mut out);

    assert!(report.is_success());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].input, missing);
    assert_eq!(report.converted.len(), 1);
    assert!(String::from_utf8(out).unwrap().contains("integerValue"));
}

#[test]
fn nothing_valid_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = BatchConverter::generate(
        vec![dir.path().to_path_buf()],
        vec![dir.path().join("out.json")],
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::NoValidPairs));
    assert!(err.is_fatal());
}

#[test]
fn configuration_drives_the_run() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("fic.toml");
    fs::write(&config_path, "pretty = false\ndirection = \"decode\"\n").unwrap();
    let config = EngineConfig::load(&config_path).unwrap();
    assert_eq!(config.direction, Direction::Decode);

    let input = write_json(&dir, "in.json", &json!({"s": {"stringValue": "v"}}));
    let mut out = Vec::new();
    let report = BatchConverter::preview(vec![input])
        .unwrap()
        .with_processor(config.processor())
        .direction(config.direction)
        .pretty(config.pretty)
        .run(&mut out);

    assert!(report.is_success());
    assert_eq!(String::from_utf8(out).unwrap(), "{\"s\":\"v\"}\n");
}
