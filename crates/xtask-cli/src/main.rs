//! Marrow repository task runner
//!
//! The `x` binary formats, checks, tests and documents the marrow workspace,
//! keeps its CI workflows in sync and adds new arrow versions.

mod cli;
mod commands;
mod error;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;
use xtask_fs::NormalizedPath;

use cli::Cli;
use error::{CliError, Result};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow().bold(), e);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = resolve_root(cli.root)?;
    tracing::debug!(root = %root, "repository root");
    commands::execute(root, cli.command)
}

/// `--root` when given, else the enclosing git work tree, else the current
/// directory.
fn resolve_root(explicit: Option<PathBuf>) -> Result<NormalizedPath> {
    if let Some(root) = explicit {
        if !root.is_dir() {
            return Err(CliError::user(format!(
                "--root {} is not a directory",
                root.display()
            )));
        }
        return Ok(NormalizedPath::canonicalize(root)?);
    }

    let cwd = std::env::current_dir()?;
    match xtask_git::discover_root(&cwd)? {
        Some(root) => Ok(root),
        None => Ok(NormalizedPath::canonicalize(&cwd)?),
    }
}
