//! Extraction of variable declarations from C-like declaration files.
//!
//! A declaration file lists the variables a cycle should read, one C++
//! declaration per statement:
//!
//! ```text
//! Int_t                  el_n;
//! std::vector<float>*    el_pt;
//! // Float_t             MET_Et;   (disabled)
//! ```
//!
//! Only the simple `type [*] name;` form is understood. Template arguments
//! are captured as opaque text and are not bracket-depth aware.

use std::path::Path;

use log::{debug, info, warn};
use regex::Regex;

use crate::comments::normalize;
use crate::declaration::Declaration;
use crate::error::Result;

/// `[//] type [*] name ;` with the type allowed one trailing `<...>` group.
const DECLARATION_PATTERN: &str = concat!(
    r"(?P<comment>(?://)?)[ \t]*",
    r"(?P<type>[A-Za-z_][A-Za-z0-9_:]*(?:[ \t]*<[^;\n]*?>)?)",
    r"(?:[ \t]*(?P<pointer>\*)[ \t]*|[ \t]+)",
    r"(?P<name>[A-Za-z_][A-Za-z0-9_]*)[ \t]*;[ \t;]*",
);

/// Scans normalized declaration text for variable declarations.
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    pub fn new() -> Result<Self> {
        Ok(Self { pattern: Regex::new(DECLARATION_PATTERN)? })
    }

    /// Returns every declaration found in `text`, in source order.
    ///
    /// The text is expected to be normalized already; see [`normalize`].
    /// Text without any declaration yields an empty list.
    pub fn tokenize(&self, text: &str) -> Vec<Declaration> {
        self.pattern
            .captures_iter(text)
            .map(|caps| {
                Declaration::new(
                    &caps["name"],
                    &caps["type"],
                    caps.name("pointer").is_some(),
                    !caps["comment"].is_empty(),
                )
            })
            .collect()
    }

    /// Normalizes the comments of `text` and tokenizes the result.
    pub fn parse(&self, text: &str) -> Vec<Declaration> {
        self.tokenize(&normalize(text))
    }
}

/// Reads the declarations listed in the file at `path`.
///
/// A file that cannot be read is reported and treated as declaring nothing.
pub fn read_declarations<P: AsRef<Path>>(path: P) -> Result<Vec<Declaration>> {
    let path = path.as_ref();
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Unable to open variable selection file '{}': {}", path.display(), e);
            return Ok(Vec::new());
        }
    };

    let declarations = Tokenizer::new()?.parse(&text);
    for declaration in &declarations {
        debug!("Found declaration: {declaration}");
    }
    info!("Read {} variable declaration(s) from '{}'", declarations.len(), path.display());
    Ok(declarations)
}
