//! [`TestProject`]: a temporary copy of a fixture project tree.
//!
//! Fixture trees live under `test-fixtures/repos/` at the workspace root.
//! They hold marker-annotated sources, so they are copied before a test
//! rewrites anything.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

use crate::git;

/// Directory holding the fixture trees.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/repos")
}

/// A temporary project directory with helpers for setup and assertions.
///
/// # Example
///
/// ```rust,no_run
/// use xtask_test_utils::project::TestProject;
///
/// let project = TestProject::from_fixture("marrow");
/// project.init_git();
/// project.assert_file_contains("marrow/src/lib.rs", "DEFAULT_ARROW_VERSION");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Copy `test-fixtures/repos/<name>` into a fresh temporary directory.
    ///
    /// # Panics
    /// Panics if the fixture does not exist or cannot be copied.
    pub fn from_fixture(name: &str) -> Self {
        let project = Self::new();
        let source = fixtures_dir().join(name);
        assert!(source.is_dir(), "Unknown fixture: {}", source.display());

        for entry in WalkDir::new(&source).min_depth(1) {
            let entry = entry.unwrap();
            let relative = entry.path().strip_prefix(&source).unwrap();
            let target = project.root().join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).unwrap();
            } else {
                fs::copy(entry.path(), &target).unwrap();
            }
        }
        project
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative`.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Commit the whole tree to a fresh git repository.
    pub fn init_git(&self) {
        git::real_git_repo_with_commit(self.root());
    }

    /// Read a file relative to the root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Could not read file {}: {e}", path.display()))
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}
