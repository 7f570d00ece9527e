//! Application configuration module
//!
//! Configuration is loaded from environment variables (and a `.env` file in
//! development) with the `SEASONS` prefix; nested values use `__` as the
//! separator, e.g. `SEASONS__SERVER__PORT=8080`.
//!
//! ```no_run
//! use seasons::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod logging;
mod server;
mod storage;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration. Every section has defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads `.env` if present, then reads `SEASONS__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("SEASONS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic checks. Database settings are only checked for the postgres backend.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.logging.validate()?;
        if self.storage.backend == StorageBackend::Postgres {
            self.database.validate()?;
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "SEASONS__SERVER__PORT",
        "SEASONS__SERVER__ENVIRONMENT",
        "SEASONS__STORAGE__BACKEND",
        "SEASONS__DATABASE__URL",
        "SEASONS__LOGGING__FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn loads_with_defaults_when_nothing_is_set() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_nested_environment_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("SEASONS__SERVER__PORT", "3000");
        env::set_var("SEASONS__SERVER__ENVIRONMENT", "production");
        env::set_var("SEASONS__STORAGE__BACKEND", "postgres");
        env::set_var("SEASONS__DATABASE__URL", "postgres://localhost/seasons");
        env::set_var("SEASONS__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.database.url, "postgres://localhost/seasons");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let config = AppConfig {
            storage: StorageConfig {
                backend: StorageBackend::Postgres,
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("SEASONS__DATABASE__URL"))
        );
    }

    #[test]
    fn memory_backend_ignores_database_section() {
        let config = AppConfig::default();
        assert!(config.database.url.is_empty());
        assert!(config.validate().is_ok());
    }
}
