//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn env_filter(&self) -> Result<EnvFilter, ValidationError> {
        let filter = match std::env::var("RUST_LOG") {
            Ok(directive) if !directive.is_empty() => EnvFilter::try_new(directive),
            _ => EnvFilter::try_new(&self.level),
        };
        filter.map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info,seasons=debug,sqlx=warn,tower_http=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(LoggingConfig::default().validate().is_ok());
    }

    #[test]
    fn malformed_filter_is_rejected() {
        let config = LoggingConfig {
            level: "seasons=loud".to_string(),
            format: LogFormat::Json,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogFilter(_))
        ));
    }
}
