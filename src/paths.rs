//! Path resolution for generated files.

use std::path::{Component, Path, PathBuf};

use globset::Glob;
use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Conventional directory for headers inside a package.
pub const INCLUDE_DIR: &str = "include";
/// Conventional directory for sources inside a package.
pub const SOURCE_DIR: &str = "src";
/// Conventional directory for job configurations inside a package.
pub const CONFIG_DIR: &str = "config";
/// File name pattern of registration files.
pub const REGISTRATION_PATTERN: &str = "*LinkDef.h";
/// Registration file created when a package has none.
pub const REGISTRATION_FILE: &str = "LinkDef.h";

/// Directories of a package that generated files are placed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub include_dir: PathBuf,
    pub source_dir: PathBuf,
    pub config_dir: PathBuf,
}

impl Layout {
    /// Uses the `include`, `src` and `config` directories of `root` where
    /// they exist, and `root` itself otherwise.
    pub fn discover<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        let pick = |name: &str| {
            let dir = root.join(name);
            if dir.is_dir() {
                dir
            } else {
                root.to_path_buf()
            }
        };
        Self {
            include_dir: pick(INCLUDE_DIR),
            source_dir: pick(SOURCE_DIR),
            config_dir: pick(CONFIG_DIR),
        }
    }

    /// Finds the registration file among the headers.
    ///
    /// Returns the single `*LinkDef.h` file if there is one and a new
    /// `LinkDef.h` path if there is none. Several candidates are an error,
    /// since there is no way to tell which one the cycle belongs to.
    pub fn registration_file(&self) -> Result<PathBuf> {
        let matcher = Glob::new(REGISTRATION_PATTERN)?.compile_matcher();
        let mut candidates = Vec::new();
        for entry in WalkDir::new(&self.include_dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            if entry.file_type().is_file() && matcher.is_match(entry.file_name()) {
                candidates.push(entry.into_path());
            }
        }

        match candidates.len() {
            0 => {
                let path = self.include_dir.join(REGISTRATION_FILE);
                warn!(
                    "There is no registration file in '{}', creating '{}'",
                    self.include_dir.display(),
                    path.display()
                );
                Ok(path)
            }
            1 => {
                let path = candidates.remove(0);
                debug!("Using registration file '{}'", path.display());
                Ok(path)
            }
            _ => Err(Error::AmbiguousRegistrationFile {
                candidates: candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

/// Makes `path` absolute relative to the current directory without touching
/// the file system.
pub fn absolute<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    }
}

/// Computes the path the source file at `source` has to use to include the
/// header at `header`.
///
/// Both paths are expected to be absolute. The common leading directories are
/// dropped, one `..` is added for every remaining directory of the source,
/// followed by the remaining directories and the file name of the header. If
/// the two directories have nothing in common below the root, the header path
/// is returned unchanged.
pub fn include_path(header: &Path, source: &Path) -> String {
    let header_dir = directory_components(header);
    let source_dir = directory_components(source);
    let file_name = header.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();

    let common = header_dir.iter().zip(&source_dir).take_while(|(h, s)| h == s).count();
    let shares_directory = header_dir[..common].iter().any(|c| matches!(c, Component::Normal(_)));
    if !shares_directory {
        return header.display().to_string();
    }

    let mut segments: Vec<String> = source_dir[common..].iter().map(|_| "..".to_string()).collect();
    segments.extend(header_dir[common..].iter().map(|c| c.as_os_str().to_string_lossy().into_owned()));
    segments.push(file_name);
    segments.join("/")
}

fn directory_components(path: &Path) -> Vec<Component<'_>> {
    path.parent()
        .map(|dir| dir.components().filter(|c| !matches!(c, Component::CurDir)).collect())
        .unwrap_or_default()
}
