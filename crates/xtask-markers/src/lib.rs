//! Marker-driven source rewriting for version bumps.
//!
//! Source and manifest files carry directives in trailing comments, written
//! as `<leader> <tag>:<kind>: <payload>`:
//!
//! ```text
//! // <tag>:insert: "arrow-{version}",
//! # <tag>:replace: default = ["arrow-{version}"]
//! ```
//!
//! The version bump uses the tag [`DEFAULT_TAG`]. Examples in this crate
//! never spell out a live directive: the bump scans these sources too.
//!
//! When a new version is added every directive stays in place and the line
//! below it receives the expanded payload. An `insert` directive keeps the
//! line that previously followed it; a `replace` directive drops it. Running
//! the rewrite again with another version therefore accumulates inserted
//! entries and keeps exactly one replaced line.
//!
//! Payloads are templates: `{version}` expands to the new version, `{\n}` to
//! a line break, and `{{` / `}}` to literal braces.
//!
//! Everything apart from the directives is treated as opaque lines, so the
//! rewriter works on any text format whose comments start with `//` or `#`.

pub mod directive;
pub mod error;
pub mod rewriter;
pub mod template;

pub use directive::{DEFAULT_TAG, Directive, DirectiveKind, MarkerFamily};
pub use error::{Error, Result};
pub use rewriter::{
    FileOutcome, FileRewrite, Rewrite, RewriteStats, plan_file, rewrite_content, rewrite_file,
    rewrite_files,
};
pub use template::{TemplateError, expand};
