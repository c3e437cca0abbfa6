//! Text file I/O for rewritten sources and generated documents.
//!
//! Writes go through a sibling temp file that is locked, synced and then
//! renamed over the target, so readers see either the old or the new text.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Read a UTF-8 text file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|e| Error::io(native, e))
}

/// Replace the content of `path` with `content`, using `\n` line endings.
///
/// Missing parent directories are created. `\r\n` sequences in `content`
/// are written as `\n`.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    let text = content.replace("\r\n", "\n");
    let target = path.to_native();
    tracing::debug!(path = %path, bytes = text.len(), "writing text");

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut staged = StagedFile::create(&target)?;
    staged.fill(text.as_bytes())?;
    staged.persist()
}

/// A temp file next to its target, removed again unless persisted.
struct StagedFile {
    file: File,
    temp: PathBuf,
    target: PathBuf,
    persisted: bool,
}

impl StagedFile {
    fn create(target: &Path) -> Result<Self> {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Same directory keeps the rename on one filesystem
        let temp = target.with_file_name(format!(".{name}.{}.tmp", std::process::id()));

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp)
            .map_err(|e| Error::io(&temp, e))?;
        file.lock_exclusive().map_err(|_| Error::LockFailed {
            path: target.to_path_buf(),
        })?;

        Ok(Self {
            file,
            temp,
            target: target.to_path_buf(),
            persisted: false,
        })
    }

    fn fill(&mut self, bytes: &[u8]) -> Result<()> {
        self.file
            .write_all(bytes)
            .and_then(|()| self.file.sync_all())
            .map_err(|e| Error::io(&self.temp, e))
    }

    fn persist(mut self) -> Result<()> {
        FileExt::unlock(&self.file).map_err(|_| Error::LockFailed {
            path: self.target.clone(),
        })?;
        fs::rename(&self.temp, &self.target).map_err(|e| Error::io(&self.target, e))?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(&self.temp);
        }
    }
}
