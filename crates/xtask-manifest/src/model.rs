//! Typed subset of a Cargo manifest.
//!
//! Only the tables the validator reads are modeled. Unknown keys are ignored
//! everywhere except inside dependency tables, where they are collected so
//! that an exact comparison can reject them.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use xtask_fs::{ConfigStore, NormalizedPath};

use crate::Result;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CargoManifest {
    #[serde(default)]
    pub package: Option<Package>,
    #[serde(default)]
    pub features: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, Dependency>,
    #[serde(default)]
    pub test: Vec<Target>,
    #[serde(default)]
    pub bench: Vec<Target>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub docs: Option<Docs>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Docs {
    #[serde(default)]
    pub rs: Option<DocsRs>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocsRs {
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

/// A `[[test]]` or `[[bench]]` target.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Target {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "required-features")]
    pub required_features: Option<Vec<String>>,
}

/// A dependency declaration, either `name = "1"` or an inline table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Simple(String),
    Detailed(DependencyDetail),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DependencyDetail {
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub optional: Option<bool>,
    #[serde(default, rename = "default-features")]
    pub default_features: Option<bool>,
    /// Keys not modeled above (`features`, `path`, ...).
    #[serde(flatten)]
    pub other: BTreeMap<String, toml::Value>,
}

impl CargoManifest {
    /// Load a manifest from disk.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    /// Parse manifest text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(ConfigStore::new().parse(&NormalizedPath::new("Cargo.toml"), content)?)
    }

    /// `package.metadata.docs.rs.features`, when declared.
    pub fn docs_rs_features(&self) -> Option<&[String]> {
        self.package
            .as_ref()?
            .metadata
            .as_ref()?
            .docs
            .as_ref()?
            .rs
            .as_ref()?
            .features
            .as_deref()
    }
}

impl Dependency {
    /// A plain version string leaves default features enabled.
    pub fn default_features_disabled(&self) -> bool {
        match self {
            Self::Simple(_) => false,
            Self::Detailed(detail) => detail.default_features == Some(false),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(version) => write!(f, "{version:?}"),
            Self::Detailed(detail) => fmt::Display::fmt(detail, f),
        }
    }
}

impl fmt::Display for DependencyDetail {
    /// Renders as a TOML inline table.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<String> = Vec::new();
        if let Some(package) = &self.package {
            entries.push(format!("package = {package:?}"));
        }
        if let Some(version) = &self.version {
            entries.push(format!("version = {version:?}"));
        }
        if let Some(optional) = self.optional {
            entries.push(format!("optional = {optional}"));
        }
        if let Some(default_features) = self.default_features {
            entries.push(format!("default-features = {default_features}"));
        }
        for (key, value) in &self.other {
            entries.push(format!("{key} = {value}"));
        }
        write!(f, "{{ {} }}", entries.join(", "))
    }
}
