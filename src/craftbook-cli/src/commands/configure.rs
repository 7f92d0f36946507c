//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up craftbook CLI defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Values the user asked to change
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub script: Option<PathBuf>,
    pub book: Option<PathBuf>,
    pub prototype: Option<String>,
    pub list_name: Option<String>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.script.is_none()
            && self.book.is_none()
            && self.prototype.is_none()
            && self.list_name.is_none()
    }

    /// Apply to a config, returning whether anything changed
    fn apply(self, config: &mut Config) -> bool {
        let before = config.clone();
        if let Some(script) = self.script {
            config.script = Some(script);
        }
        if let Some(book) = self.book {
            config.book = Some(book);
        }
        if let Some(prototype) = self.prototype {
            config.prototype = Some(prototype);
        }
        if let Some(list_name) = self.list_name {
            config.list_name = Some(list_name);
        }
        *config != before
    }
}

/// Handle the configure command
pub fn handle(update: ConfigUpdate, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if update.is_empty() {
        show_usage();
        return Ok(());
    }

    if update.apply(&mut config) {
        config.save()?;
        if let Ok(path) = Config::config_path() {
            println!("Config saved to: {}", path.display());
        }
    } else {
        println!("Configuration unchanged");
    }

    Ok(())
}

fn show_config(config: &Config) {
    let unset = "(not set)".to_string();
    let path_or_unset = |p: &Option<PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| unset.clone())
    };

    println!("Script:     {}", path_or_unset(&config.script));
    println!("Book:       {}", path_or_unset(&config.book));
    println!(
        "Prototype:  {}",
        config.prototype.as_deref().unwrap_or(craftbook::codegen::DEFAULT_PROTOTYPE)
    );
    println!(
        "List name:  {}",
        config.list_name.as_deref().unwrap_or(craftbook::codegen::DEFAULT_LIST_NAME)
    );

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

fn show_usage() {
    println!("Usage: craftbook configure --script PATH [--book PATH] [--prototype NAME] [--list-name NAME]");
    println!("   or: craftbook configure --show");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_apply_update() {
        let mut config = Config::default();
        let update = ConfigUpdate {
            script: Some(PathBuf::from("GOTHIC.src")),
            ..ConfigUpdate::default()
        };
        assert!(!update.is_empty());
        assert!(update.apply(&mut config));
        assert_eq!(config.script, Some(PathBuf::from("GOTHIC.src")));

        let same = ConfigUpdate {
            script: Some(PathBuf::from("GOTHIC.src")),
            ..ConfigUpdate::default()
        };
        assert!(!same.apply(&mut config));
    }

    #[test]
    fn test_empty_update() {
        assert!(ConfigUpdate::default().is_empty());
    }
}
