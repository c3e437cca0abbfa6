//! The add-arrow-version command

use colored::Colorize;

use xtask_core::{BumpReport, CommandRunner, Tasks};
use xtask_git::GitWorkingTree;

use crate::error::Result;

/// Add `version`, or with `dry_run` print what adding it would change.
pub fn run_add_arrow_version<R: CommandRunner>(
    tasks: &mut Tasks<R>,
    version: &str,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        let report = tasks.preview_arrow_version(version)?;
        print_preview(&report);
        return Ok(());
    }

    let tree = GitWorkingTree::open(&tasks.config().root)?;
    let report = tasks.add_arrow_version(version, &tree)?;

    println!(
        "{} Added arrow {} ({} files rewritten)",
        "OK".green().bold(),
        report.version.cyan(),
        report.files.len()
    );
    Ok(())
}

fn print_preview(report: &BumpReport) {
    if report.diffs.is_empty() {
        println!("{} No marker comments found.", "=>".blue().bold());
        return;
    }

    for diff in &report.diffs {
        for line in diff.lines() {
            println!("{}", colorize(line));
        }
    }
    println!();
    println!(
        "{} {} files would change. Run without {} to apply.",
        "=>".blue().bold(),
        report.files.len(),
        "--dry-run".cyan()
    );
}

fn colorize(line: &str) -> colored::ColoredString {
    if line.starts_with("+++") || line.starts_with("---") {
        line.bold()
    } else if line.starts_with('+') {
        line.green()
    } else if line.starts_with('-') {
        line.red()
    } else if line.starts_with("@@") {
        line.cyan()
    } else {
        line.normal()
    }
}
