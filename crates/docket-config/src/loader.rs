//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use docket_core::DocketError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Environment variable selecting the `config/{environment}.toml` overlay.
pub const ENVIRONMENT_VAR: &str = "DOCKET_ENVIRONMENT";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `DOCKET__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, DocketError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, DocketError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), DocketError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Gets a specific configuration value by key path, e.g. `cache.ttl_secs`.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, DocketError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("DOCKET")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_docket_error)?;
        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_docket_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    fn validate_config(config: &AppConfig) -> Result<(), DocketError> {
        if config.app.environment == "production" && !config.cache.enabled {
            warn!("Cache is disabled in production; every read will hit the database");
        }

        ConfigValidator::validate(config)
            .map_err(|errors| DocketError::Configuration(format_validation_errors(&errors)))
    }
}

fn config_error_to_docket_error(err: ConfigError) -> DocketError {
    DocketError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheBackend;
    use std::fs;

    fn write_default(dir: &Path, contents: &str) {
        fs::write(dir.join("default.toml"), contents).unwrap();
    }

    #[tokio::test]
    async fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_default(
            dir.path(),
            r#"
            [server]
            port = 9000

            [cache]
            backend = "memory"
            ttl_secs = 120
            "#,
        );

        let loader = ConfigLoader::new(dir.path().to_string_lossy()).unwrap();
        let config = loader.get().await;
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.database.max_connections, 20);
    }

    #[tokio::test]
    async fn test_missing_directory_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path().join("absent").to_string_lossy()).unwrap();
        assert_eq!(loader.get().await.app.name, "docket");
    }

    #[tokio::test]
    async fn test_invalid_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        write_default(dir.path(), "[cache]\nttl_secs = 0\n");

        let err = ConfigLoader::new(dir.path().to_string_lossy()).err().unwrap();
        assert!(matches!(err, DocketError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_get_value_by_path() {
        let dir = tempfile::tempdir().unwrap();
        write_default(dir.path(), "[cache]\nttl_secs = 42\n");

        let loader = ConfigLoader::new(dir.path().to_string_lossy()).unwrap();
        assert_eq!(loader.get_value::<u64>("cache.ttl_secs").await, Some(42));
        assert_eq!(loader.get_value::<u64>("cache.nope").await, None);
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        write_default(dir.path(), "[server]\nport = 9000\n");
        let loader = ConfigLoader::new(dir.path().to_string_lossy()).unwrap();

        write_default(dir.path(), "[server]\nport = 9100\n");
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.server.port, 9100);
    }
}
