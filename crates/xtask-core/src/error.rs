//! Error types for xtask-core

use xtask_manifest::ValidationError;

/// Result type for xtask-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a task.
///
/// None of them is retried: a task stops at the first error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The task refused to start (dirty working tree, invalid version)
    #[error("{reason}")]
    Precondition { reason: String },

    /// The package manifest diverges from the feature convention
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An external command exited unsuccessfully
    #[error("command `{command}` failed: {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// An external command could not be started
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from xtask-fs
    #[error(transparent)]
    Fs(#[from] xtask_fs::Error),

    /// Rewrite error from xtask-markers
    #[error(transparent)]
    Markers(#[from] xtask_markers::Error),

    /// Git error from xtask-git
    #[error(transparent)]
    Git(#[from] xtask_git::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl From<xtask_manifest::Error> for Error {
    fn from(error: xtask_manifest::Error) -> Self {
        match error {
            xtask_manifest::Error::Fs(e) => Self::Fs(e),
            xtask_manifest::Error::Validation(e) => Self::Validation(e),
        }
    }
}

impl Error {
    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::Precondition {
            reason: reason.into(),
        }
    }

    /// Process exit code for this error.
    ///
    /// Failed commands pass the child's code through (1 when it was killed by
    /// a signal). Aborted tasks exit with 3, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Precondition { .. } | Self::Validation(_) => 3,
            Self::CommandFailed { code, .. } => code.unwrap_or(1),
            _ => 1,
        }
    }
}
