//! Task orchestration for the marrow repository
//!
//! This crate ties the layer 0 crates together:
//!
//! - **Project configuration**: the supported version lists and the optional
//!   `xtask.toml` settings file
//! - **Command runner**: the seam through which cargo and rustfmt are invoked
//! - **Workflow emitter**: typed CI workflow documents
//! - **Tasks**: format, check, test, doc, manifest validation and the
//!   arrow version bump
//!
//! # Architecture
//!
//! ```text
//!                      xtask-cli
//!                          |
//!                     xtask-core
//!                          |
//!     +-----------+--------+--------+------------+
//!     |           |                 |            |
//! xtask-fs   xtask-markers   xtask-manifest   xtask-git
//! ```

pub mod config;
pub mod error;
pub mod runner;
pub mod tasks;
pub mod workflow;

pub use config::{ARROW2_VERSIONS, ARROW_VERSIONS, ProjectConfig, Settings};
pub use error::{Error, Result};
pub use runner::{CommandOutput, CommandRunner, CommandSpec, RecordingRunner, SystemRunner};
pub use tasks::{BumpReport, Tasks, validate_version};
pub use workflow::{Job, Step, Triggers, Workflow};
