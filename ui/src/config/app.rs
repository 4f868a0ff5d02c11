use super::{LoggingConfig, keys::KeyBindingsConfig, limits::*, validation::ConfigValidationError};
use crate::theme::ThemeConfig;
use client::api::DEFAULT_BASE_URL;
use client::booking::{DEFAULT_HISTORY_LIMIT, default_history_path};
use client::session::default_session_path;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    crossterm_input_listener_interval_ms: Option<u64>,
    crossterm_input_listener_retries: Option<usize>,
    poll_timeout_ms: Option<u64>,
    tick_interval_ms: Option<u64>,
    task_pool_size: Option<usize>,

    #[serde(default)]
    api: ApiConfig,
    #[serde(default)]
    session: SessionConfig,
    #[serde(default)]
    keys: KeyBindingsConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    theme: ThemeConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let timeout = self.api.request_timeout_secs();
        if !(MIN_REQUEST_TIMEOUT_SECS..=MAX_REQUEST_TIMEOUT_SECS).contains(&timeout) {
            errors.push(ConfigValidationError::RequestTimeout {
                configured: timeout,
                min_limit: MIN_REQUEST_TIMEOUT_SECS,
                max_limit: MAX_REQUEST_TIMEOUT_SECS,
            });
        }

        let base_url = self.api.base_url();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            errors.push(ConfigValidationError::BaseUrl {
                configured: base_url.to_string(),
            });
        }

        let history = self.session.history_limit();
        if !(MIN_HISTORY_LIMIT..=MAX_HISTORY_LIMIT).contains(&history) {
            errors.push(ConfigValidationError::HistoryLimit {
                configured: history,
                min_limit: MIN_HISTORY_LIMIT,
                max_limit: MAX_HISTORY_LIMIT,
            });
        }

        let pool = self.task_pool_size();
        if !(MIN_TASK_POOL_SIZE..=MAX_TASK_POOL_SIZE).contains(&pool) {
            errors.push(ConfigValidationError::TaskPoolSize {
                configured: pool,
                min_limit: MIN_TASK_POOL_SIZE,
                max_limit: MAX_TASK_POOL_SIZE,
            });
        }

        for (key, actions) in self.keys.collisions() {
            errors.push(ConfigValidationError::KeyCollision { key, actions });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn crossterm_input_listener_interval(&self) -> Duration {
        Duration::from_millis(self.crossterm_input_listener_interval_ms.unwrap_or(10))
    }

    pub fn crossterm_input_listener_retries(&self) -> usize {
        self.crossterm_input_listener_retries.unwrap_or(10)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms.unwrap_or(50))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.unwrap_or(50))
    }

    pub fn task_pool_size(&self) -> usize {
        self.task_pool_size.unwrap_or(8)
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    pub fn keys(&self) -> &KeyBindingsConfig {
        &self.keys
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }
}

/// Booking backend connection
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ApiConfig {
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(30)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs())
    }
}

/// Where the session and booking history live
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SessionConfig {
    file: Option<PathBuf>,
    history_file: Option<PathBuf>,
    history_limit: Option<usize>,
}

impl SessionConfig {
    pub fn file(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_session_path)
    }

    pub fn history_file(&self) -> PathBuf {
        self.history_file.clone().unwrap_or_else(default_history_path)
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    fn parse(toml_text: &str) -> AppConfig {
        toml::from_str(toml_text).expect("valid toml")
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api().base_url(), "http://localhost:8080");
        assert_eq!(config.api().request_timeout(), Duration::from_secs(30));
        assert_eq!(config.session().history_limit(), 5);
        assert_eq!(config.task_pool_size(), 8);
        assert_eq!(config.poll_timeout(), Duration::from_millis(50));
        assert!(config.session().file().ends_with("session.json"));
        assert!(config.session().history_file().ends_with("recent.json"));
        assert_ok!(config.validate());
    }

    #[test]
    fn test_out_of_range_values_are_reported() {
        let config = parse(
            "task_pool_size = 0\n[api]\nrequest_timeout_secs = 900\nbase_url = \"localhost\"\n[session]\nhistory_limit = 99",
        );
        let errors = assert_err!(config.validate());
        assert_eq!(errors.len(), 4);
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ConfigValidationError::RequestTimeout { configured: 900, .. }))
        );
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ConfigValidationError::BaseUrl { .. }))
        );
    }

    #[test]
    fn test_key_collision_is_reported() {
        let config = parse("[keys]\nkey_login = 'q'");
        let errors = assert_err!(config.validate());
        assert!(matches!(
            errors.as_slice(),
            [ConfigValidationError::KeyCollision { key: 'q', .. }]
        ));
    }
}
