//! Project configuration.
//!
//! The supported version lists are compiled in. Adding an arrow version
//! rewrites the list below through its marker comment, so the task runner
//! learns about the new version in the same pass as the package it manages.
//!
//! Everything else has defaults for the marrow repository and can be
//! overridden in an optional `xtask.toml` at the repository root.

use serde::{Deserialize, Serialize};
use xtask_fs::{ConfigStore, FileGlob, FileSet, NormalizedPath};
use xtask_manifest::{Convention, DefaultFeatureSet, VersionList};

use crate::Result;

/// Supported arrow releases, newest first.
pub const ARROW_VERSIONS: &[&str] = &[
    // arrow-version:insert:     "{version}",
    "53",
    "52",
    "51",
    "50",
    "49",
    "48",
    "47",
    "46",
    "45",
    "44",
    "43",
    "42",
    "41",
    "40",
    "39",
    "38",
    "37",
];

/// Supported arrow2 releases, newest first.
pub const ARROW2_VERSIONS: &[&str] = &["0-17", "0-16"];

/// Name of the optional settings file at the repository root.
pub const SETTINGS_FILE: &str = "xtask.toml";

/// Settings read from `xtask.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cargo package name; also the directory holding its manifest.
    pub package: String,
    /// Directory receiving the generated workflow files.
    pub workflow_dir: String,
    /// Features enabled in every default build.
    pub always_on_features: Vec<String>,
    /// Files passed to `rustfmt` because `cargo fmt` does not reach them.
    pub format_globs: Vec<String>,
    /// Directory names skipped when scanning for marker comments.
    pub exclude_dirs: Vec<String>,
    /// Root-level file scanned for markers in addition to the nested sources.
    pub script_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            package: "marrow".to_string(),
            workflow_dir: ".github/workflows".to_string(),
            always_on_features: vec!["serde".to_string()],
            format_globs: vec![
                "marrow/src/impl_arrow/impl*.rs".to_string(),
                "marrow/src/impl_arrow2/impl*.rs".to_string(),
                "test_with_arrow/src/tests/*.rs".to_string(),
            ],
            exclude_dirs: vec![
                "target".to_string(),
                ".git".to_string(),
                "test-fixtures".to_string(),
            ],
            script_path: "crates/xtask-core/src/config.rs".to_string(),
        }
    }
}

impl Settings {
    /// Load `xtask.toml` from `root`, falling back to the defaults.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(SETTINGS_FILE);
        let settings = ConfigStore::new().load_optional(&path)?;
        if settings.is_none() {
            tracing::debug!(path = %path, "no settings file, using defaults");
        }
        Ok(settings.unwrap_or_default())
    }
}

/// Everything a task needs to know about the repository.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub root: NormalizedPath,
    pub settings: Settings,
    pub arrow: VersionList,
    pub arrow2: VersionList,
}

impl ProjectConfig {
    pub fn new(
        root: NormalizedPath,
        settings: Settings,
        arrow: VersionList,
        arrow2: VersionList,
    ) -> Self {
        Self {
            root,
            settings,
            arrow,
            arrow2,
        }
    }

    /// Settings from `root` combined with the compiled version lists.
    pub fn load(root: NormalizedPath) -> Result<Self> {
        let settings = Settings::load(&root)?;
        Ok(Self::new(
            root,
            settings,
            VersionList::new("arrow", ARROW_VERSIONS.iter().copied()),
            VersionList::new("arrow2", ARROW2_VERSIONS.iter().copied()),
        ))
    }

    /// The feature selection for routine builds: always-on features, then
    /// the current arrow2 and arrow features.
    pub fn default_features(&self) -> DefaultFeatureSet {
        DefaultFeatureSet::new(&self.settings.always_on_features, &[&self.arrow2, &self.arrow])
    }

    /// Every feature checked on its own: always-on, arrow2, then arrow.
    pub fn all_features(&self) -> Vec<String> {
        let mut features = self.settings.always_on_features.clone();
        features.extend(self.arrow2.features());
        features.extend(self.arrow.features());
        features
    }

    pub fn convention(&self) -> Convention {
        Convention::new(self.default_features(), self.arrow.clone())
    }

    pub fn manifest_path(&self) -> NormalizedPath {
        self.root.join(&self.settings.package).join("Cargo.toml")
    }

    pub fn workflow_dir(&self) -> NormalizedPath {
        self.root.join(&self.settings.workflow_dir)
    }

    /// Files scanned for marker comments by the version bump.
    pub fn marker_files(&self) -> FileSet {
        let mut set = FileSet::new(self.root.clone())
            .with_file(self.settings.script_path.clone())
            .with_nested_extension("rs")
            .with_nested_extension("toml");
        for dir in &self.settings.exclude_dirs {
            set = set.exclude_dir(dir.clone());
        }
        set
    }

    /// Files formatted with `rustfmt` after `cargo fmt`.
    pub fn format_files(&self) -> Result<Vec<NormalizedPath>> {
        let mut set = FileSet::new(self.root.clone());
        for pattern in &self.settings.format_globs {
            set = set.with_glob(FileGlob::parse(pattern)?);
        }
        Ok(set.resolve()?)
    }
}
