use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::eval::DEFAULT_MAX_DEPTH;

pub const CONFIG_FILE_NAME: &str = "primer.toml";

/// Largest accepted `max_depth`; evaluation and decoding recurse once per level
pub const MAX_DEPTH_CEILING: usize = 1000;

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings read from `primer.toml`. Command-line flags take precedence.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Deepest expression nesting accepted by `eval`
    pub max_depth: usize,
    /// Print the evaluation trace by default
    pub trace: bool,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: DEFAULT_MAX_DEPTH,
            trace: false,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        if config.max_depth == 0 || config.max_depth > MAX_DEPTH_CEILING {
            bail!(
                "max_depth must be between 1 and {} (got {})",
                MAX_DEPTH_CEILING,
                config.max_depth
            );
        }
        Ok(config)
    }

    /// Load config from an explicit path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Resolve the config to use: an explicit path must exist; otherwise
    /// `primer.toml` in `dir` is used when present, falling back to defaults.
    pub fn resolve(explicit: Option<&PathBuf>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.clone())));
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Ok((Self::load(&candidate)?, Some(candidate)))
        } else {
            Ok((Config::default(), None))
        }
    }
}
