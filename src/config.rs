//! Runtime configuration: telemetry and per-service breaker settings.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration. [`AtelierConfig::from_json`] parses and validates in one
//! step.

use crate::remote::{
    BreakerConfig, CircuitBreaker, InvalidBreakerConfig, PROJECT_SERVICE, TASK_SERVICE,
    USER_SERVICE,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or has the wrong shape.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A breaker section holds impossible settings.
    #[error("invalid breaker settings for {service}: {source}")]
    InvalidBreaker {
        /// Service the breaker guards.
        service: &'static str,
        /// Validation failure.
        source: InvalidBreakerConfig,
    },

    /// The log filter directive is empty.
    #[error("log filter must not be empty")]
    EmptyLogFilter,
}

/// Output format for log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Single-line human-readable output.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive, e.g. `info,atelier=debug`. `RUST_LOG` takes
    /// precedence when set.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            format: LogFormat::Compact,
        }
    }
}

/// Breaker settings for each remote dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakerSettings {
    /// Guards task cleanup calls made during project deletion.
    pub task_service: BreakerConfig,
    /// Guards user existence and admin lookups.
    pub user_service: BreakerConfig,
    /// Guards catalog lookups made by the task side.
    pub project_service: BreakerConfig,
}

impl BreakerSettings {
    /// Builds one breaker per remote service, sharing `clock`.
    #[must_use]
    pub fn build<C>(&self, clock: &Arc<C>) -> RemoteBreakers
    where
        C: Clock + Send + Sync + 'static,
    {
        RemoteBreakers {
            task_service: CircuitBreaker::new(
                TASK_SERVICE,
                self.task_service.clone(),
                Arc::clone(clock),
            ),
            user_service: CircuitBreaker::new(
                USER_SERVICE,
                self.user_service.clone(),
                Arc::clone(clock),
            ),
            project_service: CircuitBreaker::new(
                PROJECT_SERVICE,
                self.project_service.clone(),
                Arc::clone(clock),
            ),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (service, config) in [
            (TASK_SERVICE, &self.task_service),
            (USER_SERVICE, &self.user_service),
            (PROJECT_SERVICE, &self.project_service),
        ] {
            config
                .validate()
                .map_err(|source| ConfigError::InvalidBreaker { service, source })?;
        }
        Ok(())
    }
}

/// Breakers built from [`BreakerSettings`].
#[derive(Debug, Clone)]
pub struct RemoteBreakers {
    /// Breaker for the task service.
    pub task_service: CircuitBreaker,
    /// Breaker for the user service.
    pub user_service: CircuitBreaker,
    /// Breaker for the project service.
    pub project_service: CircuitBreaker,
}

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use atelier::config::{AtelierConfig, LogFormat};
///
/// let config = AtelierConfig::from_json(
///     r#"{ "telemetry": { "format": "json" }, "breakers": { "task_service": { "minimum_calls": 5 } } }"#,
/// )
/// .expect("valid configuration");
/// assert_eq!(config.telemetry.format, LogFormat::Json);
/// assert_eq!(config.breakers.task_service.minimum_calls, 5);
/// assert_eq!(config.breakers.user_service.minimum_calls, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtelierConfig {
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
    /// Circuit breaker settings per remote service.
    pub breakers: BreakerSettings,
}

impl AtelierConfig {
    /// Creates a configuration where every breaker uses
    /// [`BreakerConfig::strict`].
    #[must_use]
    pub fn strict() -> Self {
        Self {
            telemetry: TelemetryConfig::default(),
            breakers: BreakerSettings {
                task_service: BreakerConfig::strict(),
                user_service: BreakerConfig::strict(),
                project_service: BreakerConfig::strict(),
            },
        }
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed input, or the first
    /// validation failure from [`Self::validate`].
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyLogFilter`] or
    /// [`ConfigError::InvalidBreaker`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telemetry.filter.trim().is_empty() {
            return Err(ConfigError::EmptyLogFilter);
        }
        self.breakers.validate()
    }
}
