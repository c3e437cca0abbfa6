//! Version lists and the feature names derived from them.

use std::collections::HashSet;
use std::fmt;

/// A family of features sharing a prefix, e.g. `arrow` or `arrow2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureFamily {
    prefix: String,
}

impl FeatureFamily {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The feature name for `version`: `arrow` + `53` gives `arrow-53`.
    pub fn feature(&self, version: &str) -> String {
        format!("{}-{}", self.prefix, version)
    }
}

/// Ordered versions of one format family. Index 0 is the current version.
///
/// The list is kept exactly as configured: it is never sorted or
/// deduplicated. Use [`VersionList::duplicates`] to report repeated entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionList {
    family: FeatureFamily,
    versions: Vec<String>,
}

impl VersionList {
    pub fn new<I, S>(prefix: &str, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            family: FeatureFamily::new(prefix),
            versions: versions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn family(&self) -> &FeatureFamily {
        &self.family
    }

    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// The current (first) version.
    pub fn current(&self) -> Option<&str> {
        self.versions.first().map(String::as_str)
    }

    /// The feature of the current version.
    pub fn current_feature(&self) -> Option<String> {
        self.current().map(|v| self.family.feature(v))
    }

    /// Feature names in list order.
    pub fn features(&self) -> Vec<String> {
        self.versions
            .iter()
            .map(|v| self.family.feature(v))
            .collect()
    }

    /// Make `version` the current entry.
    pub fn push_current(&mut self, version: impl Into<String>) {
        self.versions.insert(0, version.into());
    }

    /// Versions that appear more than once, each reported once, in order.
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for version in &self.versions {
            if !seen.insert(version.as_str()) && reported.insert(version.as_str()) {
                duplicates.push(version.as_str());
            }
        }
        duplicates
    }
}

/// The features enabled for routine build, test and doc commands.
///
/// Always-on features come first, followed by the current feature of each
/// version list in the order given. Rendered comma-separated as a cargo
/// `--features` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultFeatureSet {
    features: Vec<String>,
}

impl DefaultFeatureSet {
    pub fn new<S: AsRef<str>>(always_on: &[S], lists: &[&VersionList]) -> Self {
        let mut features: Vec<String> = always_on.iter().map(|f| f.as_ref().to_string()).collect();
        features.extend(lists.iter().filter_map(|list| list.current_feature()));
        Self { features }
    }

    pub fn sorted(&self) -> Vec<String> {
        let mut sorted = self.features.clone();
        sorted.sort();
        sorted
    }
}

impl fmt::Display for DefaultFeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.features.join(","))
    }
}
