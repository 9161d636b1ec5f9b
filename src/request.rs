//! Parameters of a single generation run.

use std::fmt;
use std::path::PathBuf;

use crate::declaration::{resolve_collisions, Declaration};
use crate::error::{Error, Result};

/// Separator between the namespace and the class name of a cycle.
pub const QUALIFIER: &str = "::";

/// A cycle class name with an optional enclosing namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleName {
    namespace: Option<String>,
    class_name: String,
}

impl CycleName {
    /// Parses `Class` or `Namespace::Class`.
    ///
    /// Only a single namespace level is supported, and both parts have to be
    /// plain C++ identifiers.
    pub fn parse(name: &str) -> Result<Self> {
        let (namespace, class_name) = match name.rsplit_once(QUALIFIER) {
            Some((namespace, class_name)) => (Some(namespace), class_name),
            None => (None, name),
        };

        let invalid = |reason: &str| Error::InvalidCycleName {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if !is_identifier(class_name) {
            return Err(invalid("the class name is not a valid identifier"));
        }
        if let Some(namespace) = namespace {
            if namespace.contains(QUALIFIER) {
                return Err(invalid("only one namespace level is supported"));
            }
            if !is_identifier(namespace) {
                return Err(invalid("the namespace is not a valid identifier"));
            }
        }

        Ok(Self {
            namespace: namespace.map(str::to_string),
            class_name: class_name.to_string(),
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CycleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}{}{}", namespace, QUALIFIER, self.class_name),
            None => f.write_str(&self.class_name),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Everything needed to generate the artifacts of one cycle.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub cycle: CycleName,
    pub header_path: PathBuf,
    pub source_path: PathBuf,
    pub registration_path: PathBuf,
    pub descriptor_path: PathBuf,
    /// Name of the analysis package the cycle belongs to.
    pub package: String,
    /// Input file written into the companion descriptor.
    pub input_source: String,
    /// Name of the input collection (tree).
    pub collection: String,
    /// Name of the output collection; output fields are generated when set.
    pub output_collection: Option<String>,
    declarations: Vec<Declaration>,
}

impl GenerationRequest {
    /// Creates a request with the conventional file names in the current
    /// directory and no variables.
    pub fn new(cycle: CycleName) -> Self {
        let class_name = cycle.class_name().to_string();
        Self {
            cycle,
            header_path: PathBuf::from(format!("{class_name}.h")),
            source_path: PathBuf::from(format!("{class_name}.cxx")),
            registration_path: PathBuf::from("LinkDef.h"),
            descriptor_path: PathBuf::from(format!("{class_name}_config.xml")),
            package: "MyAnalysis".to_string(),
            input_source: "your/input/file.root".to_string(),
            collection: crate::catalog::DEFAULT_COLLECTION.to_string(),
            output_collection: None,
            declarations: Vec::new(),
        }
    }

    /// Sets the variables of the cycle, making their identifiers unique.
    pub fn with_declarations(mut self, declarations: Vec<Declaration>) -> Self {
        self.declarations = resolve_collisions(declarations);
        self
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn generate_output(&self) -> bool {
        self.output_collection.is_some()
    }
}
