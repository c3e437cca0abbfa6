//! The repository tasks.
//!
//! Each task is a fixed sequence of commands and file operations. The first
//! failing step ends the task; nothing is retried or rolled back.

use xtask_fs::{ConfigStore, NormalizedPath};
use xtask_git::WorkingTree;
use xtask_markers::{FileOutcome, MarkerFamily, plan_file, rewrite_files};

use crate::config::ProjectConfig;
use crate::runner::{CommandRunner, CommandSpec};
use crate::workflow;
use crate::{Error, Result};

/// What a version bump touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpReport {
    pub version: String,
    /// Files rewritten, or that a preview would rewrite.
    pub files: Vec<NormalizedPath>,
    /// Unified diffs per file, only collected by a preview.
    pub diffs: Vec<String>,
}

/// Check that `version` can be spliced into feature and crate names.
///
/// Accepts non-empty identifiers made of ASCII letters, digits, `.`, `-`
/// and `_`.
pub fn validate_version(version: &str) -> Result<()> {
    let valid = !version.is_empty()
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(Error::precondition(format!(
            "invalid version '{version}': use letters, digits, '.', '-' or '_'"
        )))
    }
}

/// Runs tasks for one repository.
pub struct Tasks<R: CommandRunner> {
    config: ProjectConfig,
    runner: R,
}

impl<R: CommandRunner> Tasks<R> {
    pub fn new(config: ProjectConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Everything worth running before a commit.
    pub fn precommit(&self, backtrace: bool) -> Result<()> {
        self.update_workflows()?;
        self.format()?;
        self.check(false)?;
        self.test(None, backtrace, false)
    }

    /// Regenerate the test and release workflow files.
    pub fn update_workflows(&self) -> Result<Vec<NormalizedPath>> {
        let dir = self.config.workflow_dir();
        let store = ConfigStore::new();
        let documents = [
            ("test.yml", workflow::test_workflow(&self.config)),
            ("release.yml", workflow::release_workflow(&self.config)),
        ];

        let mut written = Vec::with_capacity(documents.len());
        for (name, document) in documents {
            let path = dir.join(name);
            tracing::info!(":: update {}", path);
            store.save(&path, &document)?;
            written.push(path);
        }
        Ok(written)
    }

    /// `cargo fmt`, then `rustfmt` for the files it does not reach.
    pub fn format(&self) -> Result<()> {
        self.run(CommandSpec::cargo().arg("fmt"))?;

        let files = self.config.format_files()?;
        if files.is_empty() {
            tracing::debug!("no extra files to format");
            return Ok(());
        }

        let root = &self.config.root;
        self.run(
            CommandSpec::new("rustfmt")
                .args(files.iter().map(|path| path.relative_to(root).to_string())),
        )
    }

    /// Validate the manifest, then run the compiler and linter.
    ///
    /// With `all`, every feature is also checked on its own.
    pub fn check(&self, all: bool) -> Result<()> {
        self.check_cargo_toml()?;
        self.run(CommandSpec::cargo().args(["check", "--all-features"]))?;
        self.run(CommandSpec::cargo().args(["clippy", "--all-features"]))?;

        if all {
            for feature in self.config.all_features() {
                self.run(self.check_feature(&feature))?;
            }
        }
        Ok(())
    }

    fn check_feature(&self, feature: &str) -> CommandSpec {
        CommandSpec::cargo().args([
            "check",
            "-p",
            self.config.settings.package.as_str(),
            "--features",
            feature,
        ])
    }

    /// Run the tests with the always-on features, then with the default
    /// feature set (or every feature when `full`).
    pub fn test(&self, name: Option<&str>, backtrace: bool, full: bool) -> Result<()> {
        let always_on = self.config.settings.always_on_features.join(",");
        let mut base = CommandSpec::cargo().arg("test");
        if !always_on.is_empty() {
            base = base.args(["--features", always_on.as_str()]);
        }

        let selection = if full {
            CommandSpec::cargo().args(["test", "--all-features"])
        } else {
            CommandSpec::cargo()
                .args(["test", "--features"])
                .arg(self.config.default_features().to_string())
        };

        for mut command in [base, selection] {
            if let Some(name) = name {
                command = command.arg(name);
            }
            if backtrace {
                command = command.env("RUST_BACKTRACE", "1");
            }
            self.run(command)?;
        }
        Ok(())
    }

    /// Build the documentation with the default feature set.
    pub fn doc(&self, private: bool, open: bool) -> Result<()> {
        let mut command = CommandSpec::cargo()
            .args(["doc", "--features"])
            .arg(self.config.default_features().to_string());
        if private {
            command = command.arg("--document-private-items");
        }
        if open {
            command = command.arg("--open");
        }
        self.run(command)
    }

    /// Validate the package manifest against the feature convention.
    pub fn check_cargo_toml(&self) -> Result<()> {
        let path = self.config.manifest_path();
        tracing::info!(":: check {}", path.relative_to(&self.config.root));

        for list in [&self.config.arrow2, &self.config.arrow] {
            for version in list.duplicates() {
                tracing::warn!(
                    family = list.family().prefix(),
                    version,
                    "duplicate entry in the version list"
                );
            }
        }

        xtask_manifest::check_manifest(&path, &self.config.convention())?;
        Ok(())
    }

    /// Compute the rewrite that adding `version` would perform.
    ///
    /// Nothing is written and no command runs, so neither a clean tree nor
    /// a git repository is needed.
    pub fn preview_arrow_version(&self, version: &str) -> Result<BumpReport> {
        validate_version(version)?;

        let family = MarkerFamily::arrow_version()?;
        let mut report = BumpReport {
            version: version.to_string(),
            ..BumpReport::default()
        };

        for path in self.config.marker_files().resolve()? {
            let Some(plan) = plan_file(&family, &path, version)? else {
                continue;
            };
            if plan.is_noop() {
                continue;
            }
            tracing::info!("would rewrite {}", path);
            report.diffs.push(plan.diff(path.relative_to(&self.config.root)));
            report.files.push(path);
        }
        Ok(report)
    }

    /// Add `version` as the current arrow version.
    ///
    /// Rewrites every marker-annotated file, then formats the code and
    /// regenerates the workflows. Refuses to run while tracked files have
    /// unstaged changes.
    pub fn add_arrow_version(
        &mut self,
        version: &str,
        tree: &dyn WorkingTree,
    ) -> Result<BumpReport> {
        validate_version(version)?;

        let unstaged = tree.unstaged_changes()?;
        if !unstaged.is_empty() {
            return Err(Error::precondition(format!(
                "potentially destructive changes: stage or commit the working tree first \
                 (unstaged: {})",
                unstaged.join(", ")
            )));
        }

        let family = MarkerFamily::arrow_version()?;
        let mut report = BumpReport {
            version: version.to_string(),
            ..BumpReport::default()
        };

        let paths = self.config.marker_files().resolve()?;
        for (path, outcome) in rewrite_files(&family, &paths, version)? {
            if let FileOutcome::Rewritten(stats) = outcome {
                tracing::debug!(
                    path = %path,
                    directives = stats.directives,
                    replaced = stats.replaced,
                    "rewritten"
                );
                report.files.push(path);
            }
        }

        self.config.arrow.push_current(version);
        self.format()?;
        self.update_workflows()?;
        Ok(report)
    }

    fn run(&self, command: CommandSpec) -> Result<()> {
        let command = command.current_dir(self.config.root.clone());
        tracing::info!(":: {}", command);

        let output = self.runner.run(&command)?;
        if output.is_success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command: command.to_string(),
                code: output.code,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("54")]
    #[case("0-18")]
    #[case("54.1_rc")]
    fn test_valid_versions(#[case] version: &str) {
        assert!(validate_version(version).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("5 4")]
    #[case("{54}")]
    #[case("54\n55")]
    #[case("ä")]
    fn test_invalid_versions(#[case] version: &str) {
        let err = validate_version(version).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
