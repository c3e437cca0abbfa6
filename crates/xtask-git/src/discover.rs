//! Repository root discovery.

use std::path::Path;

use git2::{ErrorCode, Repository};
use xtask_fs::NormalizedPath;

use crate::Result;

/// The working tree root of the repository containing `start`.
///
/// Returns `None` when `start` is not inside a git repository, or the
/// repository is bare.
pub fn discover_root(start: &Path) -> Result<Option<NormalizedPath>> {
    let repo = match Repository::discover(start) {
        Ok(repo) => repo,
        Err(e) if e.code() == ErrorCode::NotFound => {
            tracing::debug!(start = %start.display(), "no git repository found");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    match repo.workdir() {
        Some(workdir) => Ok(Some(NormalizedPath::canonicalize(workdir)?)),
        None => Ok(None),
    }
}
