use std::collections::BTreeMap;

use rstest::rstest;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use xtask_fs::{ConfigStore, Error, NormalizedPath};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Settings {
    package: String,
    features: Vec<String>,
}

fn sample() -> Settings {
    Settings {
        package: "marrow".into(),
        features: vec!["serde".into(), "arrow-53".into()],
    }
}

#[rstest]
#[case("settings.toml")]
#[case("settings.json")]
#[case("settings.yaml")]
#[case("settings.yml")]
fn test_save_then_load(#[case] name: &str) {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join(name));
    let store = ConfigStore::new();

    store.save(&path, &sample()).unwrap();
    let loaded: Settings = store.load(&path).unwrap();

    assert_eq!(loaded, sample());
}

#[test]
fn test_load_optional_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("xtask.toml"));

    let loaded: Option<Settings> = ConfigStore::new().load_optional(&path).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_parse_error_names_format_and_path() {
    let path = NormalizedPath::new("/repo/marrow/Cargo.toml");
    let err = ConfigStore::new()
        .parse::<BTreeMap<String, String>>(&path, "[package\nname = 1")
        .unwrap_err();

    assert!(matches!(err, Error::ConfigParse { ref format, .. } if format == "TOML"));
    assert!(err.to_string().contains("/repo/marrow/Cargo.toml"));
}

#[test]
fn test_unsupported_extension() {
    let path = NormalizedPath::new("/repo/settings.ini");
    let err = ConfigStore::new().render(&path, &sample()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
}
