//! Validation of the fixture manifest and variations of it.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rstest::rstest;
use xtask_fs::NormalizedPath;
use xtask_manifest::{
    CargoManifest, Convention, DefaultFeatureSet, Error, ValidationError, VersionList,
    check_manifest, validate,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/repos/marrow/marrow/Cargo.toml")
}

fn fixture() -> String {
    fs::read_to_string(fixture_path()).unwrap()
}

fn convention_for(arrow: &[&str]) -> Convention {
    let arrow = VersionList::new("arrow", arrow.iter().copied());
    let arrow2 = VersionList::new("arrow2", ["0-17", "0-16"]);
    let default_features = DefaultFeatureSet::new(&["serde"], &[&arrow2, &arrow]);
    Convention::new(default_features, arrow)
}

fn convention() -> Convention {
    convention_for(&["53", "52"])
}

fn validate_text(content: &str) -> Result<(), ValidationError> {
    let manifest = CargoManifest::parse(content).unwrap();
    validate(&manifest, &convention())
}

#[test]
fn test_fixture_manifest_is_valid() {
    check_manifest(&NormalizedPath::new(fixture_path()), &convention()).unwrap();
}

#[test]
fn test_missing_component_dependency_is_named() {
    let content = fixture().replace(
        "arrow-buffer-53 = { package = \"arrow-buffer\", version = \"53\", optional = true, default-features = false }\n",
        "",
    );
    let err = validate_text(&content).unwrap_err();
    assert_eq!(err.to_string(), "Missing dependency arrow-buffer-53");
}

#[test]
fn test_dependency_with_default_features_is_named() {
    let content = fixture().replace(
        "half = { version = \"2\", default-features = false }",
        "half = { version = \"2\" }",
    );
    let err = validate_text(&content).unwrap_err();
    assert_eq!(
        err,
        ValidationError::DefaultFeaturesEnabled {
            name: "half".into()
        }
    );
}

#[test]
fn test_underscore_default_features_spelling_is_rejected() {
    let content = fixture().replace(
        "arrow-buffer-53 = { package = \"arrow-buffer\", version = \"53\", optional = true, default-features = false }",
        "arrow-buffer-53 = { package = \"arrow-buffer\", version = \"53\", optional = true, default_features = false }",
    );
    let err = validate_text(&content).unwrap_err();
    assert!(
        matches!(
            &err,
            ValidationError::InvalidDependency { name, .. } if name == "arrow-buffer-53"
        ),
        "{err}"
    );
}

#[test]
fn test_plain_version_string_counts_as_enabled() {
    let content = fixture().replace(
        "half = { version = \"2\", default-features = false }",
        "half = \"2\"",
    );
    assert!(matches!(
        validate_text(&content),
        Err(ValidationError::DefaultFeaturesEnabled { name }) if name == "half"
    ));
}

#[test]
fn test_divergent_dependency_reports_both_sides() {
    let content = fixture().replace(
        "arrow-data-52 = { package = \"arrow-data\", version = \"52\",",
        "arrow-data-52 = { package = \"arrow-data\", version = \"52.1\",",
    );
    let err = validate_text(&content).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Invalid dependency arrow-data-52."), "{message}");
    assert!(message.contains("version = \"52\""), "{message}");
    assert!(message.contains("version = \"52.1\""), "{message}");
}

#[test]
fn test_extra_dependency_key_is_rejected() {
    let content = fixture().replace(
        "arrow-schema-53 = { package = \"arrow-schema\", version = \"53\", optional = true, default-features = false }",
        "arrow-schema-53 = { package = \"arrow-schema\", version = \"53\", optional = true, default-features = false, features = [\"serde\"] }",
    );
    assert!(matches!(
        validate_text(&content),
        Err(ValidationError::InvalidDependency { name, .. }) if name == "arrow-schema-53"
    ));
}

#[test]
fn test_incomplete_feature_definition() {
    let content = fixture().replace(
        "arrow-52 = [\"dep:arrow-array-52\", \"dep:arrow-buffer-52\", \"dep:arrow-data-52\", \"dep:arrow-schema-52\"]",
        "arrow-52 = [\"dep:arrow-array-52\", \"dep:arrow-buffer-52\", \"dep:arrow-data-52\"]",
    );
    let err = validate_text(&content).unwrap_err();
    assert_eq!(
        err,
        ValidationError::FeatureDefinition {
            feature: "arrow-52".into(),
            expected: vec![
                "dep:arrow-array-52".into(),
                "dep:arrow-buffer-52".into(),
                "dep:arrow-data-52".into(),
                "dep:arrow-schema-52".into(),
            ],
            found: vec![
                "dep:arrow-array-52".into(),
                "dep:arrow-buffer-52".into(),
                "dep:arrow-data-52".into(),
            ],
        }
    );
}

#[test]
fn test_unknown_version_is_a_missing_feature() {
    let manifest = CargoManifest::parse(&fixture()).unwrap();
    let err = validate(&manifest, &convention_for(&["53", "52", "51"])).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingFeature {
            feature: "arrow-51".into()
        }
    );
}

#[test]
fn test_new_current_version_breaks_docs_rs_features() {
    let manifest = CargoManifest::parse(&fixture()).unwrap();
    let err = validate(&manifest, &convention_for(&["54", "53", "52"])).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::FeatureList { ref label, .. } if label == "docs.rs configuration"
    ));
}

#[rstest]
#[case("test integration")]
#[case("bench throughput")]
fn test_target_required_features_are_checked(#[case] label: &str) {
    let mut content = fixture();
    if label.starts_with("test") {
        content = content.replacen(
            "required-features = [\"serde\", \"arrow2-0-17\", \"arrow-53\"]",
            "required-features = [\"serde\"]",
            1,
        );
    } else {
        content.push_str(
            "\n[[bench]]\nname = \"throughput\"\nrequired-features = [\"serde\", \"arrow-53\"]\n",
        );
    }

    let err = validate_text(&content).unwrap_err();
    let ValidationError::FeatureList {
        label: found_label,
        expected,
        ..
    } = err
    else {
        panic!("expected a feature list mismatch, got {err:?}");
    };
    assert_eq!(found_label, label);
    assert_eq!(expected, vec!["arrow-53", "arrow2-0-17", "serde"]);
}

#[test]
fn test_missing_manifest_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join("Cargo.toml"));
    let err = check_manifest(&path, &convention()).unwrap_err();
    assert!(matches!(err, Error::Fs(_)));
}

#[test]
fn test_validation_error_converts_into_crate_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Cargo.toml");
    fs::write(&path, "[package]\nname = \"marrow\"\n").unwrap();

    let err = check_manifest(&NormalizedPath::new(&path), &convention()).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingKey { .. })
    ));
}
