//! CLI configuration file.
//!
//! Every field is optional; command-line flags override file values.

use crate::observability::LogFormat;
use anyhow::{Context, Result};
use keygrind_search::DEFAULT_PROGRESS_INTERVAL;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "keygrind.yaml";

/// Defaults for `keygrind` subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Attempts between progress notifications.
    pub progress_interval: u64,
    /// Worker threads. `None` uses every available core.
    pub workers: Option<usize>,
    /// Give up after this many seconds.
    pub timeout_secs: Option<u64>,
    /// Log level used when no `-v` flag is given.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Directory for keypair files named after their address.
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            workers: None,
            timeout_secs: None,
            log_level: "warn".to_string(),
            log_format: LogFormat::Pretty,
            output_dir: None,
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present and defaults are used otherwise. Returns the config and
    /// the file it came from.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok((Self::default(), None));
                }
                fallback
            }
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        Ok((config, Some(path)))
    }

    /// Parses YAML. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML or unknown fields.
    pub fn parse(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Worker count, resolving `None` to the available parallelism.
    pub fn resolved_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        })
    }
}
