//! Project configuration for cyclegen.
//! An optional `cyclegen.json`, `cyclegen.yml` or `cyclegen.yaml` file in the
//! working directory adjusts code style, file handling and template locations.

use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["cyclegen.json", "cyclegen.yml", "cyclegen.yaml"];

/// Suffix appended to files that are replaced by generated ones.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".backup";

/// Formatting of the generated per-variable lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodeStyle {
    /// One level of indentation.
    pub indent: String,
    /// Prefix that disables a generated line.
    pub disable_marker: String,
}

impl Default for CodeStyle {
    fn default() -> Self {
        Self { indent: " ".repeat(4), disable_marker: "//".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub style: CodeStyle,
    pub backup_suffix: String,
    /// Directory with `<slot>.j2` template overrides.
    pub templates_dir: Option<PathBuf>,
    /// Directory holding the example job configuration and its schema.
    pub examples_dir: Option<PathBuf>,
    /// Name of the analysis package.
    pub package: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: CodeStyle::default(),
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            templates_dir: None,
            examples_dir: None,
            package: None,
        }
    }
}

/// Loads the configuration from `dir`, trying the supported file names in
/// order. Falls back to the defaults if none of them exists.
///
/// # Errors
/// * `Error::ConfigError` if the configuration file is neither valid JSON nor YAML
pub fn get_config<P: AsRef<Path>>(dir: P) -> Result<Config> {
    for file in CONFIG_FILES {
        let config_path = dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path)?;
            return parse_config(&content);
        }
    }

    debug!("No configuration file found (tried: {}), using defaults", CONFIG_FILES.join(", "));
    Ok(Config::default())
}

/// Parses configuration content, trying JSON first and YAML second.
pub fn parse_config(content: &str) -> Result<Config> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}
