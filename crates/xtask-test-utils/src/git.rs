//! Git repository fixtures.
//!
//! Choose the lowest-realism fixture that satisfies the test: an empty
//! repository is enough for root discovery, status checks need history.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Initialises a real git repository using `git2` (no commit, no config).
///
/// Realism level: **REAL**, valid git object store, empty history.
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Initialises a real git repository and commits everything in `path`.
///
/// Realism level: **REAL WITH HISTORY**, one commit on `main`.
///
/// Specifically:
/// - Runs `git init`
/// - Configures `user.email`, `user.name`, and `commit.gpgsign = false`
/// - Creates `README.md` when the directory has none
/// - Stages every file and makes an initial commit
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    run_git(path, &["init"]);
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);

    let readme = path.join("README.md");
    if !readme.exists() {
        fs::write(&readme, "# Test").unwrap_or_else(|e| {
            panic!("real_git_repo_with_commit: failed to write README.md: {e}")
        });
    }

    commit_all(path, "Initial commit");
    // Best-effort: older git versions may not support this flag
    let _ = Command::new("git")
        .args(["branch", "-m", "main"])
        .current_dir(path)
        .output();
}

/// Stage every change in `path` and commit it.
///
/// # Panics
/// Panics if `git add` or `git commit` fails.
pub fn commit_all(path: &Path, message: &str) {
    run_git(path, &["add", "."]);
    run_git(path, &["commit", "-m", message]);
}

fn run_git(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
