//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\soundseek\config.toml
//! - macOS: ~/Library/Application Support/soundseek/config.toml
//! - Linux: ~/.config/soundseek/config.toml
//!
//! The config file is human-readable and editable. Provider priority, mirror
//! lists and API endpoints all live here so a dead community mirror can be
//! swapped out without a rebuild.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::model::SourceTag;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Aggregation settings (provider order, result limits)
    pub search: SearchConfig,

    /// Video-hosting mirror pool
    pub invidious: InvidiousConfig,

    /// Free-music catalog API
    pub jamendo: JamendoConfig,

    /// Multi-engine aggregator workers
    pub workers: WorkersConfig,

    /// Commercial metadata fallback
    pub itunes: ItunesConfig,

    /// Lyrics lookup service
    pub lyrics: LyricsConfig,
}

/// Aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Provider priority, highest first. Unknown names are skipped with a
    /// warning; an omitted provider is simply never consulted.
    pub provider_order: Vec<String>,

    /// Result limit used when the caller does not pass one
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider_order: vec![
                "youtube".to_string(),
                "workers".to_string(),
                "jamendo".to_string(),
                "itunes".to_string(),
            ],
            default_limit: 25,
        }
    }
}

impl SearchConfig {
    /// Parse the configured order into source tags, dropping unknown names.
    pub fn provider_tags(&self) -> Vec<SourceTag> {
        self.provider_order
            .iter()
            .filter_map(|name| match name.parse::<SourceTag>() {
                Ok(tag) => Some(tag),
                Err(_) => {
                    tracing::warn!(name, "unknown provider in provider_order, skipping");
                    None
                }
            })
            .collect()
    }
}

/// Video-hosting mirror settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvidiousConfig {
    /// Community mirror base URLs, tried in order
    pub instances: Vec<String>,
}

impl Default for InvidiousConfig {
    fn default() -> Self {
        Self {
            instances: vec![
                "https://yewtu.be".to_string(),
                "https://invidious.snopyta.org".to_string(),
                "https://inv.riverside.rocks".to_string(),
                "https://invidious.tiekoetter.com".to_string(),
                "https://yt.artemislena.eu".to_string(),
            ],
        }
    }
}

/// Free-music catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JamendoConfig {
    /// API base URL
    pub api_base: String,

    /// Application client id (public, embedded by design)
    pub client_id: String,

    /// CORS relay prefixes, tried in order when the callback transport fails
    pub relays: Vec<String>,
}

impl Default for JamendoConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.jamendo.com/v3.0".to_string(),
            client_id: "b6747d04".to_string(),
            relays: vec![
                "https://corsproxy.io/?url=".to_string(),
                "https://api.allorigins.win/raw?url=".to_string(),
            ],
        }
    }
}

/// Multi-engine aggregator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkersConfig {
    /// Aggregator worker base URL
    pub endpoint: String,

    /// Engines queried in parallel per search
    pub engines: Vec<String>,
}

impl Default for WorkersConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://audio-search.nexsearch.workers.dev".to_string(),
            engines: vec![
                "soundcloud".to_string(),
                "bandcamp".to_string(),
                "mixcloud".to_string(),
            ],
        }
    }
}

/// Commercial metadata fallback settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ItunesConfig {
    /// Search endpoint URL
    pub endpoint: String,
}

impl Default for ItunesConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://itunes.apple.com/search".to_string(),
        }
    }
}

/// Lyrics service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsConfig {
    /// Base URL; artist and title are appended as path segments
    pub endpoint: String,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.lyrics.ovh/v1".to_string(),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("soundseek"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDir(dir.clone(), e))?;

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
