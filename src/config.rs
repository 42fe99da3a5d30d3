//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\playlist-dedup\config.toml
//! - macOS: ~/Library/Application Support/playlist-dedup/config.toml
//! - Linux: ~/.config/playlist-dedup/config.toml
//!
//! Every setting is optional. Without a config file the tool reads
//! `Source List.xspf` and writes `Destination List.xspf` in the working
//! directory, splitting artists on `;` and locations on `\`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dedup::DedupOptions;
use crate::error::{Error, Result};

/// Default source playlist, relative to the working directory
pub const DEFAULT_SOURCE: &str = "Source List.xspf";
/// Default destination playlist, relative to the working directory
pub const DEFAULT_DESTINATION: &str = "Destination List.xspf";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output files
    pub paths: PathsConfig,

    /// Separators used by the filter
    pub dedup: DedupOptions,

    /// Pre-parse text repair
    pub sanitizer: SanitizerConfig,
}

/// Input and output playlist locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            destination: PathBuf::from(DEFAULT_DESTINATION),
        }
    }
}

/// Sanitizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Repair unescaped single-line track fields before parsing
    pub enabled: bool,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("playlist-dedup"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if the file doesn't exist or can't be parsed.
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

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicit file
///
/// Unlike [`load`], any failure is returned to the caller.
pub fn load_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
    let config = toml::from_str(&contents)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================
