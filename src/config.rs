use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::nlp::DEFAULT_WINDOW_SECONDS;

/// Configuration for the vidmark annotation engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Keyword-extraction service settings
    #[serde(default)]
    pub nlp: NlpConfig,

    /// Caption handling settings
    #[serde(default)]
    pub captions: CaptionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpConfig {
    /// Endpoint of the keyword-extraction service
    pub endpoint: String,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionConfig {
    /// Minimum analysis window duration in seconds
    pub window_seconds: u64,

    /// Caption track language requested from the download step
    pub language: String,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/score".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            window_seconds: DEFAULT_WINDOW_SECONDS,
            language: "en".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        // Try to load from various locations
        let config_paths = [
            "vidmark.toml",
            "config/vidmark.toml",
            "~/.config/vidmark/config.toml",
            "/etc/vidmark/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self::from_env())
    }

    /// Build configuration from environment variables over defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var("VIDMARK_NLP_ENDPOINT") {
            config.nlp.endpoint = endpoint;
        }

        if let Ok(timeout) = std::env::var("VIDMARK_NLP_TIMEOUT") {
            config.nlp.request_timeout_seconds = timeout.parse().unwrap_or(30);
        }

        if let Ok(window) = std::env::var("VIDMARK_WINDOW_SECONDS") {
            config.captions.window_seconds =
                window.parse().unwrap_or(DEFAULT_WINDOW_SECONDS);
        }

        if let Ok(language) = std::env::var("VIDMARK_CAPTION_LANGUAGE") {
            config.captions.language = language;
        }

        config
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.nlp.endpoint.is_empty() {
            return Err(anyhow!("nlp.endpoint must not be empty"));
        }

        if self.nlp.request_timeout_seconds == 0 {
            return Err(anyhow!("nlp.request_timeout_seconds must be greater than 0"));
        }

        if self.captions.window_seconds == 0 {
            return Err(anyhow!("captions.window_seconds must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.captions.window_seconds, DEFAULT_WINDOW_SECONDS);
        assert_eq!(config.captions.language, "en");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.nlp.endpoint, config.nlp.endpoint);
        assert_eq!(parsed.captions.window_seconds, config.captions.window_seconds);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.nlp.request_timeout_seconds, 30);
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut config = Config::default();
        config.captions.window_seconds = 0;
        assert!(config.validate().is_err());
    }
}
