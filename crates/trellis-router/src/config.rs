//! Router configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trellis_core::{Result, RouterError, DEFAULT_REDIRECT, ROOT_PATH};
use trellis_observability::{LogFormat, LogLevel};

/// Configuration for a [`Router`](crate::Router).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Path the top-level routes are relative to.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Catch-all target for levels that configure none.
    #[serde(default = "default_redirect")]
    pub default_redirect: String,

    /// Log the decorated tree whenever routes are set.
    #[serde(default)]
    pub debug: bool,

    /// Redirects followed within one navigation before giving up.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Output format of router logs.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Minimum level of router logs.
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

fn default_base_path() -> String {
    ROOT_PATH.to_string()
}

fn default_redirect() -> String {
    DEFAULT_REDIRECT.to_string()
}

fn default_max_redirects() -> usize {
    16
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            default_redirect: default_redirect(),
            debug: false,
            max_redirects: default_max_redirects(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl RouterConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catch-all redirect target.
    pub fn with_default_redirect(mut self, to: impl Into<String>) -> Self {
        self.default_redirect = to.into();
        self
    }

    /// Set the base path of the top-level routes.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Enable or disable tree logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the redirect limit.
    pub fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Set the minimum log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Parse from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RouterError::Config(e.to_string()))
    }

    /// Parse from JSON.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| RouterError::Config(e.to_string()))
    }

    /// Load from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RouterError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_config_default() {
        let config = RouterConfig::default();

        assert_eq!(config.base_path, "/");
        assert_eq!(config.default_redirect, "/404");
        assert!(!config.debug);
        assert_eq!(config.max_redirects, 16);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_router_config_builder_chain() {
        let config = RouterConfig::new()
            .with_default_redirect("/login")
            .with_debug(true)
            .with_max_redirects(4)
            .with_log_format(LogFormat::Human)
            .with_log_level(LogLevel::Debug);

        assert_eq!(config.default_redirect, "/login");
        assert!(config.debug);
        assert_eq!(config.max_redirects, 4);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_router_config_from_toml() {
        let config = RouterConfig::from_toml_str(
            r#"
            default_redirect = "/not-found"
            debug = true
            log_format = "human"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_redirect, "/not-found");
        assert!(config.debug);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.max_redirects, 16);
    }

    #[test]
    fn test_router_config_from_json() {
        let config = RouterConfig::from_json_str(r#"{"max_redirects": 2}"#).unwrap();

        assert_eq!(config.max_redirects, 2);
        assert_eq!(config.default_redirect, "/404");
    }

    #[test]
    fn test_router_config_parse_error() {
        let err = RouterConfig::from_toml_str("debug = \"yes\"").unwrap_err();
        assert!(matches!(err, RouterError::Config(_)));
    }

    #[test]
    fn test_router_config_load_missing_file() {
        let err = RouterConfig::load("/nonexistent/trellis.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
