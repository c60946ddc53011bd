//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. `UNIFUNCS_API_KEY` (the provider's conventional credential variable)
//! 2. Environment variables (UNISEARCH_*)
//! 3. TOML config file (if UNISEARCH_CONFIG_FILE set)
//! 4. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Default base URL for the UniFuncs API.
pub const DEFAULT_BASE_URL: &str = "https://api.unifuncs.com/api";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. `UNIFUNCS_API_KEY` environment variable (maps to `api_key`)
/// 2. Environment variables (UNISEARCH_*)
/// 3. TOML config file (if UNISEARCH_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bearer token for the UniFuncs API.
    ///
    /// Set via UNIFUNCS_API_KEY (or UNISEARCH_API_KEY) environment variable,
    /// or the `api_key` key of the config file. Front-ends may override it
    /// per invocation with an explicit key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the UniFuncs API.
    ///
    /// Set via UNISEARCH_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via UNISEARCH_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via UNISEARCH_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Listen address for the web front-end.
    ///
    /// Set via UNISEARCH_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_user_agent() -> String {
    "unisearch/0.1".into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_bind_addr() -> String {
    "127.0.0.1:7860".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            bind_addr: default_bind_addr(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. `UNIFUNCS_API_KEY`
    /// 2. Environment variables prefixed with `UNISEARCH_`
    /// 3. TOML file from `UNISEARCH_CONFIG_FILE` (if set)
    /// 4. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("UNISEARCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment
            .merge(Env::prefixed("UNISEARCH_").map(|key| key.as_str().to_lowercase().into()))
            .merge(Env::raw().only(&["UNIFUNCS_API_KEY"]).map(|_| "api_key".into()));

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the bearer token, giving an explicit key precedence over the
    /// configured one.
    ///
    /// Empty strings count as absent, matching how front-ends treat a blank
    /// key field.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if neither an explicit key nor a
    /// configured key is available.
    pub fn resolve_api_key(&self, explicit: Option<String>) -> Result<String, ConfigError> {
        explicit
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone().filter(|key| !key.is_empty()))
            .ok_or_else(|| ConfigError::Missing {
                field: "api_key".into(),
                hint: "set UNIFUNCS_API_KEY or pass a key explicitly".into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://api.unifuncs.com/api");
        assert_eq!(config.user_agent, "unisearch/0.1");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.bind_addr, "127.0.0.1:7860");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(30_000));
    }

    #[test]
    fn test_load_layering_precedence() {
        let vars = [
            "UNISEARCH_CONFIG_FILE",
            "UNISEARCH_API_KEY",
            "UNISEARCH_TIMEOUT_MS",
            "UNIFUNCS_API_KEY",
        ];
        let saved: Vec<Option<String>> = vars.iter().map(|name| std::env::var(name).ok()).collect();

        let config_path =
            std::env::temp_dir().join(format!("unisearch-layering-{}.toml", std::process::id()));
        std::fs::write(&config_path, "api_key = \"file-key\"\ntimeout_ms = 5000\n").unwrap();

        unsafe {
            std::env::set_var("UNISEARCH_CONFIG_FILE", &config_path);
            std::env::remove_var("UNISEARCH_API_KEY");
            std::env::remove_var("UNISEARCH_TIMEOUT_MS");
            std::env::remove_var("UNIFUNCS_API_KEY");
        }
        let config = AppConfig::load().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.timeout_ms, 5000);

        unsafe {
            std::env::set_var("UNISEARCH_API_KEY", "prefixed-key");
            std::env::set_var("UNISEARCH_TIMEOUT_MS", "9000");
        }
        let config = AppConfig::load().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("prefixed-key"));
        assert_eq!(config.timeout_ms, 9000);

        unsafe {
            std::env::set_var("UNIFUNCS_API_KEY", "vendor-key");
        }
        let config = AppConfig::load().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("vendor-key"));
        assert_eq!(config.timeout_ms, 9000);

        let _ = std::fs::remove_file(&config_path);
        for (name, value) in vars.into_iter().zip(saved) {
            unsafe {
                match value {
                    Some(value) => std::env::set_var(name, value),
                    None => std::env::remove_var(name),
                }
            }
        }
    }

    #[test]
    fn test_resolve_api_key_explicit_wins() {
        let config = AppConfig { api_key: Some("configured-key".into()), ..Default::default() };
        let key = config.resolve_api_key(Some("explicit-key".into())).unwrap();
        assert_eq!(key, "explicit-key");
    }

    #[test]
    fn test_resolve_api_key_falls_back_to_configured() {
        let config = AppConfig { api_key: Some("configured-key".into()), ..Default::default() };
        let key = config.resolve_api_key(None).unwrap();
        assert_eq!(key, "configured-key");
    }

    #[test]
    fn test_resolve_api_key_empty_explicit_falls_through() {
        let config = AppConfig { api_key: Some("configured-key".into()), ..Default::default() };
        let key = config.resolve_api_key(Some(String::new())).unwrap();
        assert_eq!(key, "configured-key");
    }

    #[test]
    fn test_resolve_api_key_missing() {
        let config = AppConfig::default();
        let result = config.resolve_api_key(None);
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_resolve_api_key_all_empty() {
        let config = AppConfig { api_key: Some(String::new()), ..Default::default() };
        let result = config.resolve_api_key(Some(String::new()));
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }
}
