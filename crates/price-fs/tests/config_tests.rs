use price_fs::{ConfigStore, Error};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct Sample {
    name: String,
    prefixes: Vec<String>,
}

fn expected() -> Sample {
    Sample {
        name: "prices".to_string(),
        prefixes: vec!["gpt-".to_string(), "claude-".to_string()],
    }
}

#[rstest]
#[case("config.json", r#"{"name": "prices", "prefixes": ["gpt-", "claude-"]}"#)]
#[case("config.toml", "name = \"prices\"\nprefixes = [\"gpt-\", \"claude-\"]\n")]
#[case("config.yaml", "name: prices\nprefixes:\n  - gpt-\n  - claude-\n")]
#[case("config.YML", "name: prices\nprefixes: [\"gpt-\", \"claude-\"]\n")]
fn test_load_detects_format(#[case] file: &str, #[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(file);
    fs::write(&path, content).unwrap();

    let loaded: Sample = ConfigStore::new().load(&path).unwrap();
    assert_eq!(loaded, expected());
}

#[test]
fn test_load_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.ini");
    fs::write(&path, "name=prices").unwrap();

    let err = ConfigStore::new().load::<Sample>(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
}

#[test]
fn test_load_reports_parse_error_with_format() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    fs::write(&path, r#"{"name": "prices", "prefixes": "gpt-"}"#).unwrap();

    let err = ConfigStore::new().load::<Sample>(&path).unwrap_err();
    match err {
        Error::ConfigParse { format, path: p, .. } => {
            assert_eq!(format, "JSON");
            assert_eq!(p, path);
        }
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let err = ConfigStore::new()
        .load::<Sample>(&temp.path().join("config.json"))
        .unwrap_err();
    assert!(err.is_not_found());
}
