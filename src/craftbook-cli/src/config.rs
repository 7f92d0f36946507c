//! Configuration management for craftbook CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Decompiled script used when `--script` is not given
    pub script: Option<PathBuf>,
    /// Recipe book used when `--book` is not given
    pub book: Option<PathBuf>,
    /// Prototype for generated recipe instances
    pub prototype: Option<String>,
    /// Name of the generated recipe list constant
    pub list_name: Option<String>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("craftbook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Script path from the argument or the configured default
    pub fn resolve_script(&self, arg: Option<PathBuf>) -> Result<PathBuf> {
        arg.or_else(|| self.script.clone()).context(
            "No script given. Pass --script or run: craftbook configure --script PATH",
        )
    }

    /// Book path from the argument, the configured default, or `recipes.json`
    pub fn resolve_book(&self, arg: Option<PathBuf>) -> PathBuf {
        arg.or_else(|| self.book.clone())
            .unwrap_or_else(|| PathBuf::from("recipes.json"))
    }
}
