//! Settings loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;
use vidscope_core::DegradedMode;

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub events: EventsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub degraded_mode: DegradedMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    256
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let config = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. External overrides (optional)
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            File::with_name(&format!(
                "config/{}",
                std::env::var("VIDSCOPE_ENV").unwrap_or_else(|_| "development".to_string())
            ))
            .required(false),
        )
        .add_source(File::with_name("config/local").required(false))
        // 3. Environment variables (highest priority), e.g. VIDSCOPE_BACKEND__BASE_URL
        .add_source(
            Environment::with_prefix("VIDSCOPE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let config: AppConfig = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<()> {
    if config.backend.base_url.trim().is_empty() {
        anyhow::bail!("backend.base_url must not be empty");
    }
    vidscope_client::parse_base_url(&config.backend.base_url)
        .context("backend.base_url is not a usable URL")?;
    if config.backend.timeout_secs == 0 {
        anyhow::bail!("backend.timeout_secs must be > 0");
    }
    if config.events.capacity == 0 {
        anyhow::bail!("events.capacity must be > 0");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<AppConfig> {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        validate(&config)?;
        Ok(config)
    }

    #[test]
    fn test_embedded_defaults() {
        let config = parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:5000/api");
        assert_eq!(config.backend.timeout(), Duration::from_secs(10));
        assert_eq!(config.search.degraded_mode, DegradedMode::Demo);
        assert_eq!(config.events.capacity, 256);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_sections_default_when_missing() {
        let config = parse("[backend]\nbase_url = \"http://search.internal/api\"\n").unwrap();
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.search.degraded_mode, DegradedMode::Demo);
        assert_eq!(config.events.capacity, 256);
    }

    #[test]
    fn test_empty_degraded_mode() {
        let config = parse(
            "[backend]\nbase_url = \"http://x/api\"\n[search]\ndegraded_mode = \"empty\"\n",
        )
        .unwrap();
        assert_eq!(config.search.degraded_mode, DegradedMode::Empty);
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = parse("[backend]\nbase_url = \"http://x/api\"\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_rejects_blank_base_url() {
        assert!(parse("[backend]\nbase_url = \"  \"\n").is_err());
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        for url in ["localhost:5000/api", "not a url", "ftp://files.local/api"] {
            let toml = format!("[backend]\nbase_url = \"{}\"\n", url);
            let err = parse(&toml).unwrap_err();
            assert!(format!("{:#}", err).contains("base_url"), "{}", url);
        }
    }

    #[test]
    fn test_rejects_unknown_degraded_mode() {
        assert!(parse("[backend]\nbase_url = \"http://x/api\"\n[search]\ndegraded_mode = \"loud\"\n").is_err());
    }
}
