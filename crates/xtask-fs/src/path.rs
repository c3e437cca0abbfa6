//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// All paths are stored with forward slashes and converted to the
/// platform-native format only at I/O boundaries, so file sets compare and
/// sort the same way on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Resolve symlinks and relative components of an existing path.
    ///
    /// Uses `dunce` so Windows paths do not come back in `\\?\` form.
    pub fn canonicalize(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let resolved = dunce::canonicalize(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::new(resolved))
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        if self.inner.is_empty() {
            return Self {
                inner: segment_normalized,
            };
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// The path relative to `root`, or the full path when it lies elsewhere.
    pub fn relative_to<'a>(&'a self, root: &NormalizedPath) -> &'a str {
        let prefix = root.inner.trim_end_matches('/');
        match self.inner.strip_prefix(prefix) {
            Some(rest) if rest.starts_with('/') => &rest[1..],
            _ => &self.inner,
        }
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslashes_are_normalized() {
        let path = NormalizedPath::new("marrow\\src\\lib.rs");
        assert_eq!(path.as_str(), "marrow/src/lib.rs");
    }

    #[test]
    fn test_extension_and_file_name() {
        let path = NormalizedPath::new("/repo/marrow/Cargo.toml");
        assert_eq!(path.file_name(), Some("Cargo.toml"));
        assert_eq!(path.extension(), Some("toml"));
        assert_eq!(NormalizedPath::new("/repo/.gitignore").extension(), None);
    }

    #[test]
    fn test_relative_to_root() {
        let root = NormalizedPath::new("/repo/");
        let path = NormalizedPath::new("/repo/marrow/src/lib.rs");
        assert_eq!(path.relative_to(&root), "marrow/src/lib.rs");

        let elsewhere = NormalizedPath::new("/other/lib.rs");
        assert_eq!(elsewhere.relative_to(&root), "/other/lib.rs");
    }

    #[test]
    fn test_relative_to_does_not_match_sibling_prefix() {
        let root = NormalizedPath::new("/repo");
        let path = NormalizedPath::new("/repository/lib.rs");
        assert_eq!(path.relative_to(&root), "/repository/lib.rs");
    }

    #[test]
    fn test_join_on_empty_path() {
        let path = NormalizedPath::new("").join("Cargo.toml");
        assert_eq!(path.as_str(), "Cargo.toml");
    }
}
