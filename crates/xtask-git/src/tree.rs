//! Working-tree status queries.

use git2::{Repository, Status, StatusOptions};
use xtask_fs::NormalizedPath;

use crate::{Error, Result};

/// Read access to the state of a working tree.
pub trait WorkingTree {
    /// Tracked files whose working-tree content differs from the index,
    /// including unresolved merge conflicts.
    ///
    /// Untracked and ignored files are not reported. Paths are relative to
    /// the repository root; names that are not UTF-8 are converted lossily.
    fn unstaged_changes(&self) -> Result<Vec<String>>;

    /// Whether any tracked file has unstaged modifications.
    fn has_unstaged_changes(&self) -> Result<bool> {
        Ok(!self.unstaged_changes()?.is_empty())
    }
}

/// [`WorkingTree`] backed by a git repository.
pub struct GitWorkingTree {
    repo: Repository,
}

impl GitWorkingTree {
    /// Open the repository whose working tree is `root`.
    pub fn open(root: &NormalizedPath) -> Result<Self> {
        let repo = Repository::open(root.to_native())?;
        if repo.is_bare() {
            return Err(Error::Bare {
                path: root.to_native(),
            });
        }
        Ok(Self { repo })
    }
}

impl std::fmt::Debug for GitWorkingTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitWorkingTree")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl WorkingTree for GitWorkingTree {
    fn unstaged_changes(&self) -> Result<Vec<String>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false)
            .include_ignored(false)
            .exclude_submodules(true);

        // Conflicted entries carry no WT_* bit.
        let unstaged = Status::WT_MODIFIED
            | Status::WT_DELETED
            | Status::WT_TYPECHANGE
            | Status::WT_RENAMED
            | Status::CONFLICTED;

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let changes: Vec<String> = statuses
            .iter()
            .filter(|entry| entry.status().intersects(unstaged))
            .map(|entry| String::from_utf8_lossy(entry.path_bytes()).into_owned())
            .collect();

        tracing::debug!(count = changes.len(), "unstaged changes");
        Ok(changes)
    }
}
