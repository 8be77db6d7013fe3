use serde::{Deserialize, Serialize};
use std::fs;
use anyhow::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the machine's HTTP API, without a trailing slash.
    pub base_url: String,
    pub request_timeout_ms: u64,
    /// Cadence of the live-image refresh while processing is active.
    pub image_refresh_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://192.168.4.1:8080".to_string(),
            request_timeout_ms: 5000,
            image_refresh_ms: 1000,
        }
    }
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self> {
        if let Ok(config_str) = fs::read_to_string(path) {
            let config: AppConfig = serde_json::from_str(&config_str)?;
            return Ok(config);
        }

        // Fall back to default configuration
        tracing::warn!("{} not found, using default configuration", path);
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_refresh_cadence() {
        let config = AppConfig::default();
        assert_eq!(config.image_refresh_ms, 1000);
        assert!(!config.base_url.ends_with('/'));
    }

    #[test]
    fn test_parse_config_json() {
        let json = r#"{
            "base_url": "http://agbot.local",
            "request_timeout_ms": 2500,
            "image_refresh_ms": 500
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "http://agbot.local");
        assert_eq!(config.request_timeout_ms, 2500);
        assert_eq!(config.image_refresh_ms, 500);
    }
}
