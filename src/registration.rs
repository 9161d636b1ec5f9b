//! Merging of dictionary registration entries into a LinkDef file.
//!
//! The registration file is extended in place rather than replaced: new
//! entries go right before its closing `#endif` line and everything else in
//! the file is preserved.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::output::write_file;

/// Start of the line closing a registration file.
pub const TERMINAL_MARKER: &str = "#endif";

/// What happened to the registration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The file did not exist and was created.
    Created,
    /// New entries were inserted into the existing file.
    Extended,
    /// Every entry was already registered; the file was left alone.
    Unchanged,
}

/// Inserts `lines` into `text` right before its terminal marker line.
///
/// Lines that are already present in `text` are skipped. Returns `None` when
/// there is nothing to add.
///
/// # Errors
/// * `Error::MissingRegistrationMarker` if `text` has no `#endif` line
/// * `Error::AmbiguousRegistrationMarker` if it has more than one
pub fn merge_registration(text: &str, lines: &[String], path: &Path) -> Result<Option<String>> {
    let markers: Vec<usize> = line_starts(text)
        .filter(|&start| {
            text[start..]
                .trim_start_matches(|c: char| c == ' ' || c == '\t')
                .starts_with(TERMINAL_MARKER)
        })
        .collect();
    let marker = match markers.as_slice() {
        [] => return Err(Error::MissingRegistrationMarker { path: path.display().to_string() }),
        [marker] => *marker,
        _ => {
            return Err(Error::AmbiguousRegistrationMarker {
                path: path.display().to_string(),
                count: markers.len(),
            })
        }
    };

    let existing: Vec<&str> = text.lines().map(str::trim).collect();
    let new_lines: Vec<&String> = lines
        .iter()
        .filter(|line| {
            let present = existing.contains(&line.trim());
            if present {
                debug!("Already registered: {line}");
            }
            !present
        })
        .collect();
    if new_lines.is_empty() {
        return Ok(None);
    }

    let mut merged = String::with_capacity(text.len() + lines.len() * 48);
    merged.push_str(&text[..marker]);
    for line in new_lines {
        merged.push_str(line);
        merged.push('\n');
    }
    merged.push('\n');
    merged.push_str(&text[marker..]);
    Ok(Some(merged))
}

/// Adds `lines` to the registration file at `path`.
///
/// An existing file is extended in place and is never backed up. A missing
/// file is created from `scaffold`, which is only called in that case.
pub fn add_registration<F>(path: &Path, lines: &[String], scaffold: F) -> Result<MergeOutcome>
where
    F: FnOnce(&[String]) -> Result<String>,
{
    if !path.exists() {
        info!("Creating new registration file '{}'", path.display());
        write_file(path, &scaffold(lines)?)?;
        return Ok(MergeOutcome::Created);
    }

    let text = fs::read_to_string(path)?;
    match merge_registration(&text, lines, path)? {
        Some(merged) => {
            info!("Extending already existing registration file '{}'", path.display());
            fs::write(path, merged)?;
            Ok(MergeOutcome::Extended)
        }
        None => {
            info!("Registration file '{}' already lists the cycle", path.display());
            Ok(MergeOutcome::Unchanged)
        }
    }
}

fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .filter(move |&i| i < text.len())
}
