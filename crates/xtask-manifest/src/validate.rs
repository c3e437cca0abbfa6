//! Convention checks.

use std::collections::BTreeMap;

use xtask_fs::NormalizedPath;

use crate::model::{CargoManifest, Dependency, DependencyDetail};
use crate::versions::{DefaultFeatureSet, VersionList};
use crate::{Result, ValidationError};

/// The crates every arrow feature pulls in, one optional dependency each.
pub const ARROW_COMPONENTS: [&str; 4] =
    ["arrow-array", "arrow-schema", "arrow-data", "arrow-buffer"];

/// What a conforming manifest declares.
#[derive(Debug, Clone)]
pub struct Convention {
    pub default_features: DefaultFeatureSet,
    pub arrow: VersionList,
    pub components: Vec<String>,
}

impl Convention {
    pub fn new(default_features: DefaultFeatureSet, arrow: VersionList) -> Self {
        Self {
            default_features,
            arrow,
            components: ARROW_COMPONENTS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// The dependency key of `component` for `version`, e.g. `arrow-data-52`.
    pub fn dependency_name(component: &str, version: &str) -> String {
        format!("{component}-{version}")
    }

    /// The exact declaration expected for `component` at `version`.
    pub fn expected_dependency(component: &str, version: &str) -> DependencyDetail {
        DependencyDetail {
            package: Some(component.to_string()),
            version: Some(version.to_string()),
            optional: Some(true),
            default_features: Some(false),
            other: BTreeMap::new(),
        }
    }

    fn expected_feature_definition(&self, version: &str) -> Vec<String> {
        let mut expected: Vec<String> = self
            .components
            .iter()
            .map(|c| format!("dep:{}", Self::dependency_name(c, version)))
            .collect();
        expected.sort();
        expected
    }
}

/// Load the manifest at `path` and validate it.
pub fn check_manifest(path: &NormalizedPath, convention: &Convention) -> Result<()> {
    tracing::debug!(path = %path, "checking manifest");
    let manifest = CargoManifest::load(path)?;
    validate(&manifest, convention)?;
    Ok(())
}

/// Check `manifest` against `convention`, stopping at the first divergence.
pub fn validate(
    manifest: &CargoManifest,
    convention: &Convention,
) -> std::result::Result<(), ValidationError> {
    check_feature_lists(manifest, convention)?;

    for version in convention.arrow.versions() {
        check_feature_definition(manifest, convention, version)?;
        check_component_dependencies(manifest, convention, version)?;
    }

    check_default_features(manifest)
}

fn check_feature_lists(
    manifest: &CargoManifest,
    convention: &Convention,
) -> std::result::Result<(), ValidationError> {
    let expected = convention.default_features.sorted();

    let docs_rs = manifest
        .docs_rs_features()
        .ok_or_else(|| ValidationError::MissingKey {
            key: "package.metadata.docs.rs.features".to_string(),
        })?;
    compare_feature_list("docs.rs configuration", &expected, docs_rs)?;

    let targets = manifest
        .test
        .iter()
        .map(|t| ("test", t))
        .chain(manifest.bench.iter().map(|t| ("bench", t)));
    for (kind, target) in targets {
        let found = target
            .required_features
            .as_deref()
            .ok_or_else(|| ValidationError::MissingKey {
                key: format!("{kind}.{}.required-features", target.name),
            })?;
        compare_feature_list(&format!("{kind} {}", target.name), &expected, found)?;
    }

    Ok(())
}

fn compare_feature_list(
    label: &str,
    expected: &[String],
    found: &[String],
) -> std::result::Result<(), ValidationError> {
    let mut found = found.to_vec();
    found.sort();
    if found != expected {
        return Err(ValidationError::FeatureList {
            label: label.to_string(),
            expected: expected.to_vec(),
            found,
        });
    }
    Ok(())
}

fn check_feature_definition(
    manifest: &CargoManifest,
    convention: &Convention,
    version: &str,
) -> std::result::Result<(), ValidationError> {
    let feature = convention.arrow.family().feature(version);
    let definition = manifest
        .features
        .get(&feature)
        .ok_or_else(|| ValidationError::MissingFeature {
            feature: feature.clone(),
        })?;

    let expected = convention.expected_feature_definition(version);
    let mut found = definition.clone();
    found.sort();
    if found != expected {
        return Err(ValidationError::FeatureDefinition {
            feature,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_component_dependencies(
    manifest: &CargoManifest,
    convention: &Convention,
    version: &str,
) -> std::result::Result<(), ValidationError> {
    for component in &convention.components {
        let name = Convention::dependency_name(component, version);
        let actual = manifest
            .dependencies
            .get(&name)
            .ok_or_else(|| ValidationError::MissingDependency { name: name.clone() })?;

        let expected = Dependency::Detailed(Convention::expected_dependency(component, version));
        if *actual != expected {
            return Err(ValidationError::InvalidDependency {
                name,
                expected: expected.to_string(),
                found: actual.to_string(),
            });
        }
    }
    Ok(())
}

fn check_default_features(manifest: &CargoManifest) -> std::result::Result<(), ValidationError> {
    match manifest
        .dependencies
        .iter()
        .find(|(_, dependency)| !dependency.default_features_disabled())
    {
        Some((name, _)) => Err(ValidationError::DefaultFeaturesEnabled { name: name.clone() }),
        None => Ok(()),
    }
}
