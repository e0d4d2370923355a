//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{OutputFormat, print_formatted, print_success};
use crate::config::Config;
use crate::ui::theme::ThemePreset;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "feed.url", "display.time_format")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "feed.url", "display.time_format")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,

    /// Overwrite the config file with defaults
    Reset,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format).await,
        ConfigCommands::Get { key } => get(&key, format).await,
        ConfigCommands::Set { key, value } => set(&key, &value, quiet).await,
        ConfigCommands::Path => path(format).await,
        ConfigCommands::Reset => reset(quiet).await,
    }
}

async fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let toml = toml::to_string_pretty(&config)?;
            println!("{}", toml);
        }
    }

    Ok(())
}

async fn get(key: &str, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let value = get_config_value(&config, key)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&value)?);
        }
        OutputFormat::Text => {
            println!("{}", value);
        }
    }

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["feed", "url"] => Ok(config.feed.url.clone()),
        ["feed", "file"] => Ok(config
            .feed
            .file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<not set>".to_string())),
        ["feed", "poll_interval_ms"] => Ok(config.feed.poll_interval_ms.to_string()),
        ["display", "theme"] => Ok(serde_json::to_value(config.display.theme)?
            .as_str()
            .unwrap_or_default()
            .to_string()),
        ["display", "time_format"] => Ok(config.display.time_format.clone()),
        ["display", "show_staleness"] => Ok(config.display.show_staleness.to_string()),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

async fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;

    set_config_value(&mut config, key, value)?;
    config.save()?;

    print_success(&format!("Set {} = {}", key, value), quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["feed", "url"] => {
            config.feed.url = value.to_string();
        }
        ["feed", "file"] => {
            // Empty value clears the file and falls back to the URL
            config.feed.file = (!value.is_empty()).then(|| PathBuf::from(value));
        }
        ["feed", "poll_interval_ms"] => {
            config.feed.poll_interval_ms = value.parse()?;
        }
        ["display", "theme"] => {
            config.display.theme = parse_theme(value)?;
        }
        ["display", "time_format"] => {
            config.display.time_format = value.to_string();
        }
        ["display", "show_staleness"] => {
            config.display.show_staleness = value.parse()?;
        }
        _ => anyhow::bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn parse_theme(value: &str) -> Result<ThemePreset> {
    serde_json::from_value(serde_json::Value::String(value.to_lowercase()))
        .map_err(|_| anyhow::anyhow!("Unknown theme: {} (expected neon or amber)", value))
}

async fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

async fn reset(quiet: bool) -> Result<()> {
    Config::default().save()?;
    print_success("Configuration reset to defaults", quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_keys() {
        let config = Config::default();
        assert_eq!(get_config_value(&config, "feed.poll_interval_ms").unwrap(), "5000");
        assert_eq!(get_config_value(&config, "feed.file").unwrap(), "<not set>");
        assert_eq!(get_config_value(&config, "display.theme").unwrap(), "neon");
        assert!(get_config_value(&config, "feed.password").is_err());
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();

        set_config_value(&mut config, "feed.file", "/srv/events.json").unwrap();
        assert_eq!(config.feed.file, Some(PathBuf::from("/srv/events.json")));
        set_config_value(&mut config, "feed.file", "").unwrap();
        assert!(config.feed.file.is_none());

        set_config_value(&mut config, "feed.poll_interval_ms", "2500").unwrap();
        assert_eq!(config.feed.poll_interval_ms, 2500);

        set_config_value(&mut config, "display.theme", "Amber").unwrap();
        assert_eq!(config.display.theme, ThemePreset::Amber);

        set_config_value(&mut config, "display.show_staleness", "true").unwrap();
        assert!(config.display.show_staleness);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "feed.poll_interval_ms", "soon").is_err());
        assert!(set_config_value(&mut config, "display.theme", "plaid").is_err());
        assert!(set_config_value(&mut config, "display.show_staleness", "maybe").is_err());
        assert!(set_config_value(&mut config, "nope", "1").is_err());
        assert_eq!(config, Config::default());
    }
}
