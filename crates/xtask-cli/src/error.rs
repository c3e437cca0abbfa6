//! Error types for xtask-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from xtask-core
    #[error(transparent)]
    Core(#[from] xtask_core::Error),

    /// Error from xtask-fs
    #[error(transparent)]
    Fs(#[from] xtask_fs::Error),

    /// Error from xtask-git
    #[error(transparent)]
    Git(#[from] xtask_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Process exit code: task errors map through [`xtask_core::Error::exit_code`].
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(e) => e.exit_code(),
            _ => 1,
        }
    }
}
