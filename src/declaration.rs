//! Variable declarations wired into a generated cycle.

use std::collections::HashSet;
use std::fmt;

use log::warn;

use crate::classifier::is_container_type;

/// One variable to be declared, connected and optionally written out by the
/// generated cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    name: String,
    sanitized_name: String,
    type_name: String,
    is_pointer: bool,
    is_commented: bool,
    needs_reset: bool,
}

impl Declaration {
    /// Creates a declaration and classifies its type.
    ///
    /// Container types are always accessed through a pointer, regardless of
    /// the syntax they were declared with.
    pub fn new<N, T>(name: N, type_name: T, is_pointer: bool, is_commented: bool) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        let name = name.into();
        let type_name = type_name.into();
        let needs_reset = is_container_type(&type_name);
        Self {
            sanitized_name: sanitize(&name),
            name,
            type_name,
            is_pointer: is_pointer || needs_reset,
            is_commented,
            needs_reset,
        }
    }

    /// The identifier as it was declared or as it appears in the data source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The identifier used for the generated member variables.
    pub fn sanitized_name(&self) -> &str {
        &self.sanitized_name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_pointer(&self) -> bool {
        self.is_pointer
    }

    pub fn is_commented(&self) -> bool {
        self.is_commented
    }

    /// Whether the output mirror of this variable has to be cleared each event.
    pub fn needs_reset(&self) -> bool {
        self.needs_reset
    }

    fn with_sanitized_name(mut self, sanitized_name: String) -> Self {
        self.sanitized_name = sanitized_name;
        self
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {}{}",
            if self.is_commented { "//" } else { "" },
            self.type_name,
            if self.is_pointer { "*" } else { "" },
            self.name
        )
    }
}

/// Turns an arbitrary name into a C++ identifier.
///
/// Every character that is not an ASCII letter, digit or underscore becomes
/// `_`. Names that would be empty or start with a digit get a leading `_`.
pub fn sanitize(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if sanitized.is_empty() || sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        sanitized.insert(0, '_');
    }
    sanitized
}

/// Makes the sanitized names of `declarations` unique.
///
/// A declaration whose sanitized name was already taken gets the first free
/// numeric suffix (`_2`, `_3`, ...). The raw names are left alone, so both
/// variables keep binding to their own input.
pub fn resolve_collisions(declarations: Vec<Declaration>) -> Vec<Declaration> {
    let mut taken = HashSet::new();
    declarations
        .into_iter()
        .map(|declaration| {
            if taken.insert(declaration.sanitized_name.clone()) {
                return declaration;
            }
            let mut counter = 2;
            let unique = loop {
                let candidate = format!("{}_{}", declaration.sanitized_name, counter);
                if !taken.contains(&candidate) {
                    break candidate;
                }
                counter += 1;
            };
            warn!(
                "Variable '{}' collides with another variable as '{}', using '{}' instead",
                declaration.name, declaration.sanitized_name, unique
            );
            taken.insert(unique.clone());
            declaration.with_sanitized_name(unique)
        })
        .collect()
}
