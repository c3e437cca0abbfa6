//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Development tasks for the marrow repository
#[derive(Parser, Debug)]
#[command(name = "x")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository root (default: the enclosing git work tree)
    #[arg(long, global = true, env = "XTASK_ROOT")]
    pub root: Option<PathBuf>,

    /// The task to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available tasks
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run all common development tasks before a commit
    Precommit {
        /// Print a backtrace when a test fails
        #[arg(long)]
        backtrace: bool,
    },

    /// Update the github workflows
    UpdateWorkflows,

    /// Format the code
    Format,

    /// Run the linters
    Check {
        /// Also check every feature on its own
        #[arg(long)]
        all: bool,
    },

    /// Run the tests
    Test {
        /// Only run tests whose name contains this filter
        test_name: Option<String>,

        /// Print a backtrace when a test fails
        #[arg(long)]
        backtrace: bool,

        /// Run with all features instead of the default feature set
        #[arg(long)]
        full: bool,
    },

    /// Generate the documentation
    Doc {
        /// Document private items
        #[arg(long)]
        private: bool,

        /// Open the documentation in a browser
        #[arg(long)]
        open: bool,
    },

    /// Check the features and dependencies declared in the package manifest
    CheckCargoToml,

    /// Add a new arrow version
    ///
    /// Rewrites every marker comment in the repository, then formats the
    /// code and regenerates the workflows. Requires a working tree without
    /// unstaged changes.
    ///
    /// Examples:
    ///   x add-arrow-version 54
    ///   x add-arrow-version 54 --dry-run
    AddArrowVersion {
        /// The arrow version, as used in crate and feature names
        version: String,

        /// Print the changes as a diff instead of writing them
        #[arg(long)]
        dry_run: bool,
    },
}
