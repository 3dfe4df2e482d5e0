//! Configuration for the sightline CLI.
//!
//! Configuration is loaded from TOML files in the following locations (in order):
//! 1. Platform config dir (`~/Library/Application Support/sightline/config.toml` on macOS)
//! 2. `~/.config/sightline/config.toml` (Unix-style)
//! 3. `./config.toml` (current directory, for development)

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sightline_platform::Denylist;
use std::fs;
use std::path::PathBuf;

/// Smallest allowed watch cadence. Anything faster hammers the window
/// server for no gain.
const MIN_WATCH_INTERVAL_MS: u64 = 50;

/// Main configuration structure for sightline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Owner names excluded from window enumeration.
    pub denylist: DenylistConfig,
    /// Watch-mode polling configuration.
    pub watch: WatchConfig,
    /// Behavior configuration.
    pub behavior: BehaviorConfig,
}

/// Denylist configuration.
///
/// By default the extra owners extend the built-in per-platform set.
/// Setting `replace = true` discards the built-in set entirely, which a
/// recorder embedding its own chrome window typically wants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DenylistConfig {
    /// Replace the built-in set instead of extending it.
    pub replace: bool,

    /// Additional owner names to exclude (matched case-insensitively).
    pub extra_owners: Vec<String>,
}

/// Watch-mode polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Milliseconds between visibility polls.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

/// Behavior-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// Default value functions for serde
fn default_interval_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// A non-fatal problem found while validating the configuration.
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
}

impl Config {
    /// Load configuration from standard locations.
    ///
    /// Returns default config if no file is found.
    pub fn load() -> Result<Self> {
        let paths = config_paths();

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Clamp out-of-range values, reporting each adjustment.
    pub fn validate(&mut self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.watch.interval_ms < MIN_WATCH_INTERVAL_MS {
            warnings.push(ConfigWarning {
                field: "watch.interval_ms".to_string(),
                message: format!(
                    "{} is below the minimum of {}, clamping",
                    self.watch.interval_ms, MIN_WATCH_INTERVAL_MS
                ),
            });
            self.watch.interval_ms = MIN_WATCH_INTERVAL_MS;
        }

        warnings
    }

    /// Build the effective denylist from this configuration.
    pub fn denylist(&self) -> Denylist {
        if self.denylist.replace {
            Denylist::new(self.denylist.extra_owners.iter())
        } else {
            Denylist::host_default().with_extra(self.denylist.extra_owners.iter())
        }
    }
}

/// Get all possible config file paths in priority order.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Platform standard config directory
    if let Some(proj_dirs) = ProjectDirs::from("", "", "sightline") {
        paths.push(proj_dirs.config_dir().join("config.toml"));
    }

    // 2. Unix-style: ~/.config/sightline/config.toml
    if let Some(home) = dirs_home() {
        paths.push(home.join(".config").join("sightline").join("config.toml"));
    }

    // 3. Current directory: ./config.toml
    paths.push(PathBuf::from("config.toml"));

    paths
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
