use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::loader::DEFAULT_SEPARATOR;
use crate::IndexKind;

/// A configuration used for loading indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Kind of index to load when none is specified.
    pub kind: IndexKind,
    /// Separator between the key and value field of a line.
    pub separator: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kind: IndexKind::CharString,
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl Config {
    /// The per-user configuration file, `<config dir>/indexator/config.toml`
    /// on most platforms.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "indexator")
            .context("Could not figure out the configuration directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`, falling back to defaults if it does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = ?path, "Using default configuration");
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("Parsing {}", path.display()))
    }

    /// Parse configuration from a TOML document.
    pub fn parse(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }
}
