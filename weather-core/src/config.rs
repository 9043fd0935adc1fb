use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::provider::{ClientConfig, ForecastDays};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "WEATHERAPI_KEY";

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_days = 3
/// refresh_minutes = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_days: u8,
    pub refresh_minutes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_days: 3,
            refresh_minutes: 10,
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        let trimmed = api_key.trim();
        self.api_key = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Pick the API key, preferring a non-empty override (usually the environment).
    pub fn resolve_api_key(&self, override_key: Option<String>) -> Result<String> {
        override_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
            .ok_or_else(|| {
                anyhow!(
                    "No WeatherAPI.com key configured.\n\
                     Hint: run `weather-dashboard configure` or set {API_KEY_ENV}."
                )
            })
    }

    /// Build the client configuration, reading the key override from the environment.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self.resolve_api_key(std::env::var(API_KEY_ENV).ok())?;
        Ok(ClientConfig { api_key, base_url: self.base_url.clone() })
    }

    pub fn default_days(&self) -> ForecastDays {
        ForecastDays::new(self.default_days)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_minutes.max(1) * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.resolve_api_key(None).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No WeatherAPI.com key configured"));
        assert!(msg.contains("Hint: run `weather-dashboard configure`"));
    }

    #[test]
    fn override_key_wins_over_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED".into());

        let key = cfg.resolve_api_key(Some("FROM_ENV".into())).unwrap();
        assert_eq!(key, "FROM_ENV");
    }

    #[test]
    fn blank_override_falls_back_to_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED".into());

        let key = cfg.resolve_api_key(Some("   ".into())).unwrap();
        assert_eq!(key, "STORED");
    }

    #[test]
    fn set_api_key_clears_on_blank_input() {
        let mut cfg = Config::default();
        cfg.set_api_key("  KEY  ".into());
        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));

        cfg.set_api_key("".into());
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        let cfg = Config::from_toml("api_key = \"abc\"\n").unwrap();

        assert_eq!(cfg.api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        // Free WeatherAPI.com plans return at most three days.
        assert_eq!(cfg.default_days, 3);
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(600));
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let cfg = Config {
            api_key: Some("abc".into()),
            base_url: "http://localhost:9999".into(),
            default_days: 6,
            refresh_minutes: 2,
        };

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn default_days_are_clamped() {
        let cfg = Config { default_days: 12, ..Config::default() };
        assert_eq!(cfg.default_days().get(), 7);
    }
}
