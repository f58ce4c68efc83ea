//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants;
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ApiSettings,
    #[serde(default)]
    pub routing: RoutingSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
    /// Appended to every page title: "{title} - {title_suffix}".
    pub title_suffix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoutingSettings {
    pub login_path: String,
    pub landing_path: String,
    pub denied_message: String,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            login_path: constants::LOGIN_PATH.to_string(),
            landing_path: constants::DEFAULT_LANDING_PATH.to_string(),
            denied_message: constants::PERMISSION_DENIED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionSettings {
    /// JSON file backing the persisted session. In-memory only when unset.
    pub storage_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    /// Rolling log directory. Stderr only when unset.
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "admin-console.log".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config: Self = Self::builder(&env)?.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the console cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            return Err(AppError::InvalidConfig(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if !self.routing.login_path.starts_with('/') || !self.routing.landing_path.starts_with('/') {
            return Err(AppError::InvalidConfig("routing paths must start with '/'".into()));
        }
        if self.routing.login_path == self.routing.landing_path {
            return Err(AppError::InvalidConfig(
                "routing.login_path and routing.landing_path must differ".into(),
            ));
        }
        Ok(())
    }

    fn builder(env: &str) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("app.env", env)?
            .set_default("app.name", "admin-console")?
            .set_default("app.title_suffix", constants::DEFAULT_TITLE_SUFFIX)?
            .set_default("api.base_url", "http://127.0.0.1:8080")?
            .set_default("api.timeout_seconds", constants::DEFAULT_API_TIMEOUT_SECS)?
            .set_default("routing.login_path", constants::LOGIN_PATH)?
            .set_default("routing.landing_path", constants::DEFAULT_LANDING_PATH)?
            .set_default("routing.denied_message", constants::PERMISSION_DENIED_MESSAGE)?
            .set_default("logging.level", "info")?
            .set_default("logging.file_prefix", "admin-console.log")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CONSOLE").separator("__").try_parsing(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let config: AppConfig = AppConfig::builder("test")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.app.env, "test");
        assert_eq!(config.routing.login_path, "/login");
        assert_eq!(config.routing.landing_path, "/dashboard");
        assert_eq!(config.api.timeout_seconds, 10);
        assert!(config.session.storage_path.is_none());
        assert!(config.logging.directory.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config: AppConfig = AppConfig::builder("test")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        config.api.base_url = "localhost:8080".into();
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));

        config.api.base_url = "https://admin.example.org".into();
        config.routing.landing_path = "/login".into();
        assert!(config.validate().is_err());
    }
}
