//! Working-tree status and repository discovery for the task runner
//!
//! The version bump rewrites files in place, so it only runs on a tree whose
//! tracked files carry no unstaged edits. [`WorkingTree`] is the seam the
//! task layer uses for that check.

pub mod discover;
pub mod error;
pub mod tree;

pub use discover::discover_root;
pub use error::{Error, Result};
pub use tree::{GitWorkingTree, WorkingTree};
