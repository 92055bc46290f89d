//! Configuration loading and management.
//!
//! Loads configuration from `./config.toml` (or `$CHAPERONE_CONFIG_PATH`).
//! Environment variables override file values; file values override
//! defaults.
//!
//! Precedence: env vars > config file > defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChaperoneConfig {
    /// AI co-analyzer provider settings (`[ai]`).
    pub ai: AiConfig,
    /// Logging settings (`[logging]`).
    pub logging: LoggingConfig,
}

/// Provider selection for the AI co-analyzer.
///
/// Passed explicitly into the provider router; nothing reads this from
/// ambient global state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Provider name: `anthropic`, `openai`, or `ollama`.
    pub provider: String,
    /// API key for cloud providers. Optional; resolution fails without it
    /// for providers that need one.
    pub api_key: Option<String>,
    /// Model identifier passed to the provider.
    pub model: String,
    /// Endpoint override (base URL for Ollama, full URL otherwise).
    pub endpoint: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_owned(),
            api_key: None,
            model: "claude-sonnet-4-20250514".to_owned(),
            endpoint: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for JSON log files; console-only when unset.
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            dir: None,
        }
    }
}

impl ChaperoneConfig {
    /// Load configuration with precedence: env vars > TOML file > defaults.
    ///
    /// Config file path: `$CHAPERONE_CONFIG_PATH` or `./config.toml`.
    /// A missing file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from TOML file only, no env overrides.
    fn load_from_file() -> Result<Self> {
        let path = Self::config_path_with(|key| std::env::var(key).ok());
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config from file");
                let config: ChaperoneConfig =
                    toml::from_str(&contents).context("failed to parse config TOML")?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config file found, using defaults");
                Ok(ChaperoneConfig::default())
            }
            Err(e) => Err(anyhow::anyhow!("failed to read config file: {e}")),
        }
    }

    /// Resolve config path using a custom env resolver (for testing).
    fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        if let Some(p) = env("CHAPERONE_CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("config.toml")
    }

    /// Apply environment variable overrides (env > config > defaults).
    ///
    /// Takes a resolver function for testability.
    fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("CHAPERONE_PROVIDER") {
            self.ai.provider = v;
        }
        if let Some(v) = env("CHAPERONE_API_KEY") {
            self.ai.api_key = Some(v);
        }
        if let Some(v) = env("CHAPERONE_MODEL") {
            self.ai.model = v;
        }
        if let Some(v) = env("CHAPERONE_ENDPOINT") {
            self.ai.endpoint = Some(v);
        }
        if let Some(v) = env("CHAPERONE_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = env("CHAPERONE_LOG_DIR") {
            self.logging.dir = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChaperoneConfig::default();
        assert_eq!(config.ai.provider, "anthropic");
        assert!(config.ai.api_key.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: ChaperoneConfig = toml::from_str(
            r#"
            [ai]
            provider = "ollama"
            model = "llama3"
            "#,
        )
        .expect("should parse");
        assert_eq!(config.ai.provider, "ollama");
        assert_eq!(config.ai.model, "llama3");
        // Unspecified sections keep their defaults.
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config: ChaperoneConfig = toml::from_str(
            r#"
            [ai]
            provider = "ollama"
            "#,
        )
        .expect("should parse");
        config.apply_overrides(|key| match key {
            "CHAPERONE_PROVIDER" => Some("openai".to_owned()),
            "CHAPERONE_API_KEY" => Some("test-key".to_owned()),
            _ => None,
        });
        assert_eq!(config.ai.provider, "openai");
        assert_eq!(config.ai.api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_config_path_env_override() {
        let path = ChaperoneConfig::config_path_with(|key| {
            (key == "CHAPERONE_CONFIG_PATH").then(|| "/tmp/custom.toml".to_owned())
        });
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn test_config_path_default() {
        let path = ChaperoneConfig::config_path_with(|_| None);
        assert_eq!(path, PathBuf::from("config.toml"));
    }
}
