use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ui::theme::ThemePreset;

/// Shortest poll interval accepted from configuration
const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where events are read from and how often
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed URL
    #[serde(default = "default_url")]
    pub url: String,
    /// Local events file; takes precedence over `url` when set
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Milliseconds between polls
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            file: None,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl FeedConfig {
    /// Poll interval, never shorter than the configured minimum
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}

fn default_url() -> String {
    "http://localhost:5173/data/events.json".to_string()
}

fn default_poll_interval_ms() -> u64 {
    5000
}

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Color theme for the desktop dashboard
    #[serde(default)]
    pub theme: ThemePreset,
    /// strftime pattern for the Time column
    #[serde(default = "default_time_format")]
    pub time_format: String,
    /// Show when the last successful poll happened and how many have failed since
    #[serde(default)]
    pub show_staleness: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreset::default(),
            time_format: default_time_format(),
            show_staleness: false,
        }
    }
}

fn default_time_format() -> String {
    "%H:%M:%S".to_string()
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "healwatch", "Healwatch")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, falling back to defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.feed.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[feed]\nfile = \"/srv/events.json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.feed.file, Some(PathBuf::from("/srv/events.json")));
        assert_eq!(config.feed.url, default_url());
        assert_eq!(config.feed.poll_interval_ms, 5000);
        assert_eq!(config.display.time_format, "%H:%M:%S");
        assert!(!config.display.show_staleness);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.feed.url = "http://dash.internal/data/events.json".to_string();
        config.display.theme = ThemePreset::Amber;
        config.display.show_staleness = true;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_poll_interval_is_clamped() {
        let feed = FeedConfig {
            poll_interval_ms: 0,
            ..FeedConfig::default()
        };
        assert_eq!(feed.poll_interval(), Duration::from_millis(MIN_POLL_INTERVAL_MS));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[feed\nurl = 3").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
