//! Application configuration.
//!
//! Read from `config.json` in the platform config directory, then
//! overridden by `ARTIC_*` environment variables. A missing file means
//! defaults.

use std::path::Path;
use std::time::Duration;

use artic_lib::ArticClient;
use artic_lib::ArticClientBuilder;
use artic_lib::DEFAULT_BASE_URL;
use log::LevelFilter;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API base URL, without the `/artworks` suffix.
    pub base_url: String,
    /// Records per page; server default when unset.
    pub page_size: Option<u32>,
    /// Field projection; `None` keeps the client's default projection.
    pub fields: Option<Vec<String>>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: None,
            fields: None,
            timeout_secs: 10,
            connect_timeout_secs: 5,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads the config file at `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Loads from the platform config file and applies the environment.
    pub fn load_default() -> Result<Self, ConfigError> {
        let mut config = match crate::paths::config_file() {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies `ARTIC_BASE_URL`, `ARTIC_PAGE_SIZE` and `ARTIC_LOG` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ARTIC_BASE_URL") {
            self.base_url = url;
        }
        if let Some(size) = lookup("ARTIC_PAGE_SIZE") {
            let parsed = size.trim().parse::<u32>().ok().filter(|s| *s > 0);
            match parsed {
                Some(size) => self.page_size = Some(size),
                None => {
                    return Err(ConfigError::InvalidValue {
                        key: "ARTIC_PAGE_SIZE",
                        value: size,
                    });
                }
            }
        }
        if let Some(level) = lookup("ARTIC_LOG") {
            self.log_level = level;
        }
        self.level_filter()?;
        Ok(())
    }

    /// Parses `log_level`.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "log_level",
                value: self.log_level.clone(),
            })
    }

    /// A client builder carrying this configuration.
    pub fn client_builder(&self) -> ArticClientBuilder {
        let mut builder = ArticClient::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .user_agent(concat!("artic-tui/", env!("CARGO_PKG_VERSION")));
        if let Some(size) = self.page_size {
            builder = builder.page_size(size);
        }
        if let Some(fields) = &self.fields {
            builder = builder.fields(fields.iter().cloned());
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"page_size": 25}"#).unwrap();
        assert_eq!(config.page_size, Some(25));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("artic-tui-no-such-config.json");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[
                ("ARTIC_BASE_URL", "http://localhost:9000/api/v1"),
                ("ARTIC_PAGE_SIZE", "50"),
                ("ARTIC_LOG", "debug"),
            ]))
            .unwrap();

        assert_eq!(config.base_url, "http://localhost:9000/api/v1");
        assert_eq!(config.page_size, Some(50));
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_overrides() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(env(&[("ARTIC_PAGE_SIZE", "zero")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "ARTIC_PAGE_SIZE", .. }));

        let mut config = Config::default();
        assert!(config.apply_overrides(env(&[("ARTIC_LOG", "loud")])).is_err());
    }

    #[test]
    fn test_client_builder_applies_settings() {
        let config = Config {
            base_url: "http://localhost:9000/api/v1".to_string(),
            page_size: Some(5),
            ..Config::default()
        };
        let client = config.client_builder().build().unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/api/v1");
        assert_eq!(client.page_size(), Some(5));
    }
}
