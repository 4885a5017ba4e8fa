//! Server configuration
//!
//! Read once at startup from environment variables. Unset or unparsable
//! values fall back to the defaults below.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_WEATHER_API_URL: &str = "https://hackathon-project-ysen.onrender.com";
pub const DEFAULT_ADVICE_API_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_ADVICE_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_WEATHER_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// JSON catalog override; `None` uses the embedded tables
    pub catalog_path: Option<PathBuf>,
    pub weather_api_url: String,
    pub advice_api_url: String,
    /// Without a key every advice request degrades to the placeholder
    pub advice_api_key: Option<String>,
    pub advice_model: String,
    pub weather_cache_ttl: Duration,
    pub http_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            catalog_path: None,
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            advice_api_url: DEFAULT_ADVICE_API_URL.to_string(),
            advice_api_key: None,
            advice_model: DEFAULT_ADVICE_MODEL.to_string(),
            weather_cache_ttl: Duration::from_secs(DEFAULT_WEATHER_CACHE_TTL_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a closure over a map)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        ServerConfig {
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            catalog_path: non_empty("CATALOG_PATH").map(PathBuf::from),
            weather_api_url: non_empty("WEATHER_API_URL").unwrap_or(defaults.weather_api_url),
            advice_api_url: non_empty("ADVICE_API_URL").unwrap_or(defaults.advice_api_url),
            advice_api_key: non_empty("ADVICE_API_KEY"),
            advice_model: non_empty("ADVICE_MODEL").unwrap_or(defaults.advice_model),
            weather_cache_ttl: non_empty("WEATHER_CACHE_TTL_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.weather_cache_ttl),
            http_timeout: non_empty("HTTP_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
        }
    }

    /// Log the effective configuration (the API key is never printed)
    pub fn log_summary(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  PORT: {}", self.port);
        match &self.catalog_path {
            Some(path) => tracing::info!("  CATALOG_PATH: {}", path.display()),
            None => tracing::info!("  CATALOG_PATH: <built-in>"),
        }
        tracing::info!("  WEATHER_API_URL: {}", self.weather_api_url);
        tracing::info!("  ADVICE_API_URL: {}", self.advice_api_url);
        tracing::info!("  ADVICE_MODEL: {}", self.advice_model);
        tracing::info!(
            "  ADVICE_API_KEY: {}",
            if self.advice_api_key.is_some() { "set" } else { "unset (placeholder advice)" }
        );
        tracing::info!("  WEATHER_CACHE_TTL_SECS: {}", self.weather_cache_ttl.as_secs());
        tracing::info!("  HTTP_TIMEOUT_SECS: {}", self.http_timeout.as_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("CATALOG_PATH", "/etc/crop_advisor/catalog.json"),
            ("ADVICE_API_KEY", "secret"),
            ("WEATHER_CACHE_TTL_SECS", "60"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/etc/crop_advisor/catalog.json")));
        assert_eq!(config.advice_api_key.as_deref(), Some("secret"));
        assert_eq!(config.weather_cache_ttl, Duration::from_secs(60));
        assert_eq!(config.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("ADVICE_API_KEY", "   ")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.advice_api_key.is_none());
    }
}
