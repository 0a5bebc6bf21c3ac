//! Configuration management for Helly CLI
//!
//! Stores the server URL and API key in ~/.config/helly/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "helly";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Set API key
    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    /// Server URL, preferring an explicit override (`--base-url` / `HELLY_URL`)
    pub fn base_url<'a>(&'a self, override_url: Option<&'a str>) -> &'a str {
        override_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config_uses_default_url() {
        let config = Config::parse("api_key = \"abc\"\n").unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.base_url, default_base_url());
    }

    #[test]
    fn test_toml_round_trip_omits_missing_key() {
        let config = Config {
            api_key: None,
            base_url: "https://helly.example.com".into(),
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(!text.contains("api_key"));
        assert_eq!(Config::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_base_url_override() {
        let config = Config::default();
        assert_eq!(config.base_url(None), "http://localhost:8000");
        assert_eq!(config.base_url(Some("  ")), "http://localhost:8000");
        assert_eq!(
            config.base_url(Some("https://helly.example.com")),
            "https://helly.example.com"
        );
    }
}
