//! Filesystem helpers for the repository task runner
//!
//! Provides normalized paths, atomic text I/O, format-detecting config
//! loading and the file-set scanner used by the version bump.

pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod scan;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use scan::{FileGlob, FileSet};
