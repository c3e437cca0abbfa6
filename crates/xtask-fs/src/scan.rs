//! File-set resolution relative to a repository root.
//!
//! A [`FileSet`] is a description, not a snapshot: membership is evaluated
//! each time [`FileSet::resolve`] is called. Three kinds of members exist:
//!
//! - explicit files (`crates/xtask-core/src/config.rs`), included when present
//! - single-directory globs (`marrow/src/impl_arrow/impl*.rs`)
//! - nested extensions: every file with the extension that lives inside a
//!   subdirectory of the root, at any depth (root-level files are not
//!   included, the same as a `*/**/*.rs` glob)

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result};

/// A glob matching files of a single directory with at most one `*`.
///
/// `marrow/src/impl_arrow/impl*.rs` matches `impl_api_47.rs` inside
/// `marrow/src/impl_arrow`, but nothing in its subdirectories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGlob {
    dir: String,
    prefix: String,
    suffix: Option<String>,
}

impl FileGlob {
    /// Parse a root-relative pattern.
    ///
    /// # Errors
    /// Returns `Error::InvalidPattern` when a directory component contains a
    /// wildcard or the file component contains more than one.
    pub fn parse(pattern: &str) -> Result<Self> {
        let normalized = pattern.replace('\\', "/");
        let (dir, name) = match normalized.rsplit_once('/') {
            Some((dir, name)) => (dir.to_string(), name.to_string()),
            None => (String::new(), normalized.clone()),
        };

        let invalid = |reason: &str| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if dir.contains('*') {
            return Err(invalid("wildcards are only supported in the file name"));
        }
        if name.is_empty() {
            return Err(invalid("missing file name"));
        }

        match name.split_once('*') {
            None => Ok(Self {
                dir,
                prefix: name,
                suffix: None,
            }),
            Some((_, rest)) if rest.contains('*') => {
                Err(invalid("at most one wildcard is supported"))
            }
            Some((prefix, suffix)) => Ok(Self {
                dir,
                prefix: prefix.to_string(),
                suffix: Some(suffix.to_string()),
            }),
        }
    }

    /// The directory the glob lists, relative to the root.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// Whether a file name matches the file component of the glob.
    pub fn matches(&self, name: &str) -> bool {
        match &self.suffix {
            None => name == self.prefix,
            Some(suffix) => {
                name.len() >= self.prefix.len() + suffix.len()
                    && name.starts_with(&self.prefix)
                    && name.ends_with(suffix.as_str())
            }
        }
    }
}

/// Description of a set of files under a repository root.
#[derive(Debug, Clone)]
pub struct FileSet {
    root: NormalizedPath,
    files: Vec<String>,
    globs: Vec<FileGlob>,
    nested_extensions: Vec<String>,
    exclude_dirs: Vec<String>,
}

impl FileSet {
    /// An empty set rooted at `root`.
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            files: Vec::new(),
            globs: Vec::new(),
            nested_extensions: Vec::new(),
            exclude_dirs: Vec::new(),
        }
    }

    /// Include a root-relative file when it exists.
    pub fn with_file(mut self, relative: impl Into<String>) -> Self {
        self.files.push(relative.into());
        self
    }

    /// Include the files matched by a single-directory glob.
    pub fn with_glob(mut self, glob: FileGlob) -> Self {
        self.globs.push(glob);
        self
    }

    /// Include every file with `extension` located inside a subdirectory.
    pub fn with_nested_extension(mut self, extension: impl Into<String>) -> Self {
        self.nested_extensions.push(extension.into());
        self
    }

    /// Skip directories with this name during the nested scan.
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.exclude_dirs.push(name.into());
        self
    }

    /// Resolve the set against the filesystem.
    ///
    /// Paths are deduplicated and returned in sorted order.
    pub fn resolve(&self) -> Result<Vec<NormalizedPath>> {
        let mut found = BTreeSet::new();

        for relative in &self.files {
            let path = self.root.join(relative);
            if path.is_file() {
                found.insert(path);
            } else {
                tracing::debug!(path = %path, "explicit file missing, skipped");
            }
        }

        for glob in &self.globs {
            self.collect_glob(glob, &mut found)?;
        }

        if !self.nested_extensions.is_empty() {
            self.collect_nested(&mut found)?;
        }

        tracing::debug!(root = %self.root, count = found.len(), "resolved file set");
        Ok(found.into_iter().collect())
    }

    fn collect_glob(&self, glob: &FileGlob, found: &mut BTreeSet<NormalizedPath>) -> Result<()> {
        let dir = if glob.dir().is_empty() {
            self.root.clone()
        } else {
            self.root.join(glob.dir())
        };
        let native = dir.to_native();
        if !native.is_dir() {
            tracing::debug!(dir = %dir, "glob directory missing, skipped");
            return Ok(());
        }

        let entries = fs::read_dir(&native).map_err(|e| Error::io(&native, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&native, e))?;
            let is_file = entry
                .file_type()
                .map_err(|e| Error::io(entry.path(), e))?
                .is_file();
            let name = entry.file_name();
            if is_file && glob.matches(&name.to_string_lossy()) {
                found.insert(NormalizedPath::new(entry.path()));
            }
        }
        Ok(())
    }

    fn collect_nested(&self, found: &mut BTreeSet<NormalizedPath>) -> Result<()> {
        let root = self.root.to_native();
        // min_depth would hide depth-1 directories from filter_entry, so
        // root-level files are skipped by hand instead.
        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                // The root itself is never pruned, whatever its name.
                entry.depth() == 0
                    || !(entry.file_type().is_dir() && self.is_excluded(entry.path()))
            });

        for entry in walker {
            let entry = entry.map_err(|e| Error::Walk {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone()),
                message: e.to_string(),
            })?;
            if entry.depth() < 2 || !entry.file_type().is_file() {
                continue;
            }
            let matches_extension = entry
                .path()
                .extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy();
                    self.nested_extensions.iter().any(|wanted| *wanted == ext)
                })
                .unwrap_or(false);
            if matches_extension {
                found.insert(NormalizedPath::new(entry.path()));
            }
        }
        Ok(())
    }

    fn is_excluded(&self, dir: &Path) -> bool {
        dir.file_name()
            .map(|name| {
                let name = name.to_string_lossy();
                self.exclude_dirs.iter().any(|excluded| *excluded == name)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_with_prefix_and_suffix() {
        let glob = FileGlob::parse("marrow/src/impl_arrow/impl*.rs").unwrap();
        assert_eq!(glob.dir(), "marrow/src/impl_arrow");
        assert!(glob.matches("impl_api_47.rs"));
        assert!(glob.matches("impl.rs"));
        assert!(!glob.matches("mod.rs"));
        assert!(!glob.matches("impl_api_47.rs.bak"));
    }

    #[test]
    fn test_glob_without_wildcard_is_literal() {
        let glob = FileGlob::parse("x.rs").unwrap();
        assert_eq!(glob.dir(), "");
        assert!(glob.matches("x.rs"));
        assert!(!glob.matches("y.rs"));
    }

    #[test]
    fn test_glob_rejects_directory_wildcards() {
        assert!(FileGlob::parse("*/src/*.rs").is_err());
        assert!(FileGlob::parse("src/*a*.rs").is_err());
        assert!(FileGlob::parse("src/").is_err());
    }

    #[test]
    fn test_glob_prefix_and_suffix_do_not_overlap() {
        let glob = FileGlob::parse("dir/ab*ba").unwrap();
        assert!(!glob.matches("aba"));
        assert!(glob.matches("abba"));
    }
}
