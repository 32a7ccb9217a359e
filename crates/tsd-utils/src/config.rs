//! Configuration file handling for TSD projects.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tsd_core::{Error, Limits};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "tsd.toml";

/// Represents the tsd.toml configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub project: Project,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    /// AST documents merged in order, relative to the configuration file
    #[serde(default)]
    pub sources: Vec<PathBuf>,
}

/// Analyzer limits; missing keys fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub max_depth: usize,
    pub max_message_length: usize,
    pub max_operator_payload: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            max_depth: limits.max_depth,
            max_message_length: limits.max_message_length,
            max_operator_payload: limits.max_operator_payload,
        }
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}

impl Config {
    /// Creates a new default configuration with the given project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            project: Project {
                name: name.into(),
                version: default_version(),
                sources: Vec::new(),
            },
            analyzer: AnalyzerConfig::default(),
        }
    }

    /// Loads configuration from a tsd.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if a limit
    /// is out of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;

        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.as_ref().display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a tsd.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration")?;

        fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))
    }

    /// Finds the tsd.toml file starting from `start` and walking up.
    ///
    /// Returns the configuration and the directory containing it.
    ///
    /// # Errors
    /// Returns an error if no tsd.toml is found or it cannot be loaded.
    pub fn find_from(start: impl Into<PathBuf>) -> Result<(Self, PathBuf)> {
        let mut current_dir = start.into();

        loop {
            let config_path = current_dir.join(CONFIG_FILE);
            if config_path.exists() {
                let config = Self::load(&config_path)?;
                return Ok((config, current_dir));
            }

            if !current_dir.pop() {
                anyhow::bail!(
                    "Could not find {CONFIG_FILE} in current directory or any parent directory"
                );
            }
        }
    }

    /// Checks that every limit is usable.
    ///
    /// # Errors
    /// Returns a configuration error naming the offending key.
    pub fn validate(&self) -> std::result::Result<(), Error> {
        if self.analyzer.max_depth == 0 {
            return Err(Error::Config(
                "analyzer.max_depth must be greater than 0".to_string(),
            ));
        }
        if self.analyzer.max_message_length == 0 {
            return Err(Error::Config(
                "analyzer.max_message_length must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// The analyzer limits described by this configuration.
    pub fn limits(&self) -> Limits {
        Limits {
            max_depth: self.analyzer.max_depth,
            max_message_length: self.analyzer.max_message_length,
            max_operator_payload: self.analyzer.max_operator_payload,
        }
    }

    /// Resolves the configured sources against the project directory.
    pub fn source_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.project
            .sources
            .iter()
            .map(|source| root.join(source))
            .collect()
    }
}
