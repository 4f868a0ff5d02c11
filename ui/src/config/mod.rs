use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub mod app;
pub mod keys;
pub mod limits;
pub mod validation;

pub use app::{ApiConfig, AppConfig, SessionConfig};
pub use keys::KeyBindingsConfig;
pub use validation::{ConfigLoadResult, ConfigValidationError};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Global configuration loading and access
static CONFIG: std::sync::OnceLock<ConfigLoadResult> = std::sync::OnceLock::new();

/// Load configuration from `path` (optional) and the environment.
///
/// Sources, lowest precedence first: the TOML file, then `.env` and process
/// environment variables with `__` as section separator (`API__BASE_URL`).
pub fn load_config_from(path: &Path) -> ConfigLoadResult {
    dotenv::dotenv().ok();
    let env_source = Environment::default().separator("__");
    let file_source = File::from(path.to_path_buf()).required(false);

    let config = match Config::builder()
        .add_source(file_source)
        .add_source(env_source)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check {} and your environment variables.",
                path.display()
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => ConfigLoadResult::Success(Box::new(app_config)),
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

/// Load the global configuration from `path`. Only the first call loads;
/// later calls return the cached result.
pub fn init_config(path: impl Into<PathBuf>) -> &'static ConfigLoadResult {
    let path = path.into();
    CONFIG.get_or_init(|| load_config_from(&path))
}

pub fn get_config() -> &'static ConfigLoadResult {
    CONFIG.get_or_init(|| load_config_from(Path::new(DEFAULT_CONFIG_FILE)))
}

pub fn get_config_or_panic() -> &'static AppConfig {
    match get_config() {
        ConfigLoadResult::Success(config) => config,
        ConfigLoadResult::LoadError(e) => {
            panic!("Failed to load config: {e}");
        }
        ConfigLoadResult::DeserializeError(e) => {
            panic!("Failed to deserialize config: {e}");
        }
    }
}

/// Additional logging configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
