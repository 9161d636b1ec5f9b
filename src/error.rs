//! Error handling for cyclegen.
//! Defines the error type and result alias used throughout the application.

use thiserror::Error;

/// Errors that can occur while generating an analysis cycle.
///
/// Only some of them are fatal for a run. A malformed registration file or
/// descriptor example aborts just the artifact it belongs to; the caller logs
/// the error and carries on with the remaining artifacts.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Represents errors raised by the template engine
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents invalid regular expressions
    #[error("Pattern error: {0}.")]
    RegexError(#[from] regex::Error),

    /// Represents invalid file name patterns
    #[error("Glob pattern error: {0}.")]
    GlobError(#[from] globset::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The cycle name is not `Class` or `Namespace::Class`.
    #[error("Invalid cycle name '{name}': {reason}.")]
    InvalidCycleName { name: String, reason: String },

    /// More than one candidate registration file was found and none was named.
    #[error("Multiple registration files found ({candidates}); use --linkdef to choose one.")]
    AmbiguousRegistrationFile { candidates: String },

    /// An existing registration file has no terminal marker line.
    #[error("Registration file '{path}' is not in the right format: no '#endif' line found.")]
    MissingRegistrationMarker { path: String },

    /// An existing registration file has several terminal marker lines.
    #[error(
        "Registration file '{path}' is not in the right format: {count} '#endif' lines found, expected exactly one."
    )]
    AmbiguousRegistrationMarker { path: String, count: usize },

    /// The example descriptor does not have the structure the adapter expects.
    #[error("Example descriptor has an unexpected structure: {reason}.")]
    MalformedDescriptor { reason: String },

    /// An example file needed for the job configuration is not available.
    #[error("Expected to find example file '{name}' in {location}.")]
    MissingExample { name: String, location: String },
}

/// Convenience type alias for Results with cyclegen's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
