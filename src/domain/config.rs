//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the chat transport, the voice gateway, the sound catalog and bot settings.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_PREFIX: char = '?';

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Whether `sender` holds elevated privilege.
    pub fn is_admin(&self, sender: &str) -> bool {
        self.bot
            .admin
            .iter()
            .any(|a| a.to_lowercase() == sender.to_lowercase())
    }
}

/// Bot-level settings.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub admin: Vec<String>,
}

impl BotConfig {
    /// The command prefix. Falls back to `?` when unset or empty; only the first character counts.
    pub fn prefix(&self) -> char {
        self.prefix
            .as_deref()
            .and_then(|p| p.chars().next())
            .unwrap_or(DEFAULT_PREFIX)
    }
}

/// Location of the sound index and audio files.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_index")]
    pub index: String,
    #[serde(default = "default_sounds_dir")]
    pub sounds_dir: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            index: default_index(),
            sounds_dir: default_sounds_dir(),
        }
    }
}

fn default_index() -> String {
    "data/sounds.json".to_string()
}

fn default_sounds_dir() -> String {
    "data/sounds".to_string()
}

/// Configuration for the connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
    pub playback: PlaybackConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Voice gateway the bot delegates playback to.
#[derive(Debug, Deserialize, Clone)]
pub struct PlaybackConfig {
    pub endpoint: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}
