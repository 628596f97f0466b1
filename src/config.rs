//! Configuration module for LinkerLab

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::models::Platform;
use crate::paths;
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme
    #[serde(default)]
    pub theme: Theme,

    /// Platforms selected when a new session starts
    #[serde(default = "default_platforms")]
    pub default_platforms: Vec<Platform>,

    /// Fill the editor with demo content on start
    #[serde(default = "default_seed_demo_content")]
    pub seed_demo_content: bool,

    /// Delay before demo content appears (ms)
    #[serde(default = "default_demo_seed_delay")]
    pub demo_seed_delay_ms: u64,

    /// Simulated AI latency (ms)
    #[serde(default = "default_ai_delay")]
    pub ai_delay_ms: u64,

    /// How long the AI result indicator stays before resetting (ms)
    #[serde(default = "default_ai_status_reset")]
    pub ai_status_reset_ms: u64,

    /// Simulated publish latency (ms)
    #[serde(default = "default_publish_delay")]
    pub publish_delay_ms: u64,

    /// How long "Published!" stays on the button (ms)
    #[serde(default = "default_publish_reset")]
    pub publish_reset_ms: u64,

    /// How long notifications stay on screen (ms)
    #[serde(default = "default_notification_ttl")]
    pub notification_ttl_ms: u64,
}

fn default_platforms() -> Vec<Platform> {
    vec![Platform::Pinterest, Platform::Facebook]
}

const fn default_seed_demo_content() -> bool {
    true
}

const fn default_demo_seed_delay() -> u64 {
    1000
}

const fn default_ai_delay() -> u64 {
    2000
}

const fn default_ai_status_reset() -> u64 {
    3000
}

const fn default_publish_delay() -> u64 {
    2000
}

const fn default_publish_reset() -> u64 {
    3000
}

const fn default_notification_ttl() -> u64 {
    4000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            default_platforms: default_platforms(),
            seed_demo_content: default_seed_demo_content(),
            demo_seed_delay_ms: default_demo_seed_delay(),
            ai_delay_ms: default_ai_delay(),
            ai_status_reset_ms: default_ai_status_reset(),
            publish_delay_ms: default_publish_delay(),
            publish_reset_ms: default_publish_reset(),
            notification_ttl_ms: default_notification_ttl(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        paths::config_path()
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Demo seeding delay
    pub const fn demo_seed_delay(&self) -> Duration {
        Duration::from_millis(self.demo_seed_delay_ms)
    }

    /// Simulated AI latency
    pub const fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    /// AI indicator reset delay
    pub const fn ai_status_reset(&self) -> Duration {
        Duration::from_millis(self.ai_status_reset_ms)
    }

    /// Simulated publish latency
    pub const fn publish_delay(&self) -> Duration {
        Duration::from_millis(self.publish_delay_ms)
    }

    /// Publish button reset delay
    pub const fn publish_reset(&self) -> Duration {
        Duration::from_millis(self.publish_reset_ms)
    }

    /// Notification lifetime
    pub const fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.toml")).unwrap();
        assert_eq!(config.default_platforms, vec![Platform::Pinterest, Platform::Facebook]);
        assert_eq!(config.ai_delay(), Duration::from_millis(2000));
        assert_eq!(config.notification_ttl_ms, 4000);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_platforms = [\"youtube\"]\nai_delay_ms = 10\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_platforms, vec![Platform::YouTube]);
        assert_eq!(config.ai_delay_ms, 10);
        assert_eq!(config.publish_delay_ms, 2000);
        assert!(config.seed_demo_content);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        let config = Config {
            seed_demo_content: false,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.seed_demo_content);
        assert_eq!(loaded.theme, config.theme);
    }
}
