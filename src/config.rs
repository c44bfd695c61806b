//! Config module - optional settings file (latex2anki.toml).
//!
//! ```toml
//! deck = "Physics"
//! upgrade = false
//! tags = ["latex"]
//!
//! [anki]
//! host = "localhost"
//! port = 8765
//! ```
//!
//! Command-line flags override anything set here.

use crate::anki::{DEFAULT_HOST, DEFAULT_PORT};
use crate::convert::DEFAULT_DECK;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where AnkiConnect listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnkiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub anki: AnkiConfig,

    /// Target deck
    #[serde(default = "default_deck")]
    pub deck: String,

    /// Overwrite existing notes with the same front
    #[serde(default)]
    pub upgrade: bool,

    /// Tags attached to new notes
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_deck() -> String {
    DEFAULT_DECK.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anki: AnkiConfig::default(),
            deck: default_deck(),
            upgrade: false,
            tags: Vec::new(),
        }
    }
}

/// Default config directory (~/.config/latex2anki/)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("latex2anki"))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("latex2anki.toml")
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Cannot parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Loads the default config file, or built-in defaults when there is none.
    pub fn load_default() -> Result<Self> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).with_context(|| "Cannot serialize config to TOML")?;

        std::fs::write(path, content)
            .with_context(|| format!("Cannot write config file: {}", path.display()))?;

        Ok(())
    }
}
