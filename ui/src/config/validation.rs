use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid api.request_timeout_secs: {configured} (min: {min_limit}, max: {max_limit})")]
    RequestTimeout {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid api.base_url: {configured}")]
    BaseUrl { configured: String },
    #[error("Invalid session.history_limit: {configured} (min: {min_limit}, max: {max_limit})")]
    HistoryLimit {
        configured: usize,
        min_limit: usize,
        max_limit: usize,
    },
    #[error("Invalid task_pool_size: {configured} (min: {min_limit}, max: {max_limit})")]
    TaskPoolSize {
        configured: usize,
        min_limit: usize,
        max_limit: usize,
    },
    #[error("Key '{key}' is bound to more than one action: {}", actions.join(", "))]
    KeyCollision {
        key: char,
        actions: Vec<&'static str>,
    },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::RequestTimeout {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Request timeout out of range!\n\nYour configured value: {configured} seconds\nValid range: {min_limit} - {max_limit} seconds\n\nPlease update request_timeout_secs in the [api] section of config.toml."
                )
            }
            ConfigValidationError::BaseUrl { configured } => {
                format!(
                    "Backend address is not a URL!\n\nYour configured value: {configured}\n\nPlease set base_url in the [api] section of config.toml to an http:// or https:// address."
                )
            }
            ConfigValidationError::HistoryLimit {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Recent bookings limit out of range!\n\nYour configured value: {configured}\nValid range: {min_limit} - {max_limit}\n\nPlease update history_limit in the [session] section of config.toml."
                )
            }
            ConfigValidationError::TaskPoolSize {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Task pool size out of range!\n\nYour configured value: {configured}\nValid range: {min_limit} - {max_limit}\n\nPlease update task_pool_size in config.toml."
                )
            }
            ConfigValidationError::KeyCollision { key, actions } => {
                format!(
                    "Conflicting key bindings!\n\nKey '{key}' is used for: {}\n\nPlease give each action its own key in the [keys] section of config.toml.",
                    actions.join(", ")
                )
            }
        }
    }
}

/// Configuration loading result
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}
