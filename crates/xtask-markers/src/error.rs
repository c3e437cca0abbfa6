//! Error types for xtask-markers

use crate::template::TemplateError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] xtask_fs::Error),

    #[error("Invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid marker payload at {location}:{line}: {source}")]
    Template {
        location: String,
        line: usize,
        #[source]
        source: TemplateError,
    },
}
