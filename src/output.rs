//! Writing generated files without silently losing existing ones.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::Result;

/// Writes generated files, moving files they replace out of the way first.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    backup_suffix: String,
}

impl OutputWriter {
    pub fn new<S: Into<String>>(backup_suffix: S) -> Self {
        Self { backup_suffix: backup_suffix.into() }
    }

    /// Path an existing file at `path` is moved to before being replaced.
    pub fn backup_path(&self, path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(&self.backup_suffix);
        PathBuf::from(name)
    }

    /// Renames an existing file at `path` to its backup path.
    ///
    /// Returns the backup path if a file was moved.
    pub fn backup(&self, path: &Path) -> Result<Option<PathBuf>> {
        if !path.exists() {
            return Ok(None);
        }
        let backup = self.backup_path(path);
        warn!("File '{}' already exists", path.display());
        warn!("Moving '{}' to '{}'", path.display(), backup.display());
        fs::rename(path, &backup)?;
        Ok(Some(backup))
    }

    /// Backs up any existing file at `path` and writes `content` in its place.
    pub fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.backup(path)?;
        write_file(path, content)
    }
}

/// Writes `content` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
