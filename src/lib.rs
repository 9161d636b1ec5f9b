//! cyclegen creates the skeleton of an SFrame analysis cycle.
//! It turns a list of variable declarations into a cycle header and source,
//! registers the new classes for dictionary generation and adapts an example
//! job configuration to the new cycle.

/// Catalog of the variables stored in an input data file
pub mod catalog;

/// Recognition of container types that have to be cleared between events
pub mod classifier;

/// Command-line interface module for the cyclegen application
pub mod cli;

/// Normalization of C and C++ comments into line comments
pub mod comments;

/// Configuration handling for cyclegen
/// Supports JSON and YAML formats (cyclegen.json, cyclegen.yml, cyclegen.yaml)
pub mod config;

/// Variable declaration records
pub mod declaration;

/// Job configuration descriptor adaptation
pub mod descriptor;

/// Error types and handling for the cyclegen application
pub mod error;

/// Rendering of the cycle header, source and registration entries
pub mod generator;

/// Backup-aware writing of generated files
pub mod output;

/// Package layout discovery and include path computation
pub mod paths;

/// Core generation orchestration
/// Combines all components to write the final artifacts
pub mod processor;

/// Registration file merging
pub mod registration;

/// Template rendering engine abstraction
pub mod renderer;

/// The cycle to generate and its variables
pub mod request;

/// Default code templates and their overrides
pub mod templates;

/// Parsing of variable declaration lists
pub mod tokenizer;
