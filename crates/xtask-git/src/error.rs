//! Error types for xtask-git

use std::path::PathBuf;

/// Result type for xtask-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in xtask-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] xtask_fs::Error),

    #[error("Repository at {path} has no working tree")]
    Bare { path: PathBuf },
}
