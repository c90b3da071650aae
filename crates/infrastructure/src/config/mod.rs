//! Application configuration
//!
//! Split into focused sub-modules:
//! - `integrations`: SOS directory, notification gateway, n8n
//! - `dispatch`: contact selection bounds and alert settings
//!
//! Sources, lowest precedence first: built-in defaults, `config.toml` in the
//! working directory (or an explicit file), then `SOS__`-prefixed
//! environment variables with `__` between path segments
//! (`SOS__DIRECTORY__API_KEY`, `SOS__SELECTION__MAX_CONTACTS`).

mod dispatch;
mod integrations;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use dispatch::{AlertAppConfig, SelectionConfig};
pub use integrations::{ApiEndpointConfig, N8nAppConfig};

use crate::telemetry::LoggingConfig;

/// Application environment (development or production)
///
/// Controls how strictly missing credentials are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - relaxed validation
    #[default]
    Development,
    /// Production environment - missing credentials are logged as warnings
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// SOS responder directory
    #[serde(default)]
    pub directory: ApiEndpointConfig,

    /// Notification gateway
    #[serde(default)]
    pub gateway: ApiEndpointConfig,

    /// Contact selection bounds
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Alert dispatch settings
    #[serde(default)]
    pub alert: AlertAppConfig,

    /// n8n workflow engine (optional)
    #[serde(default)]
    pub n8n: Option<N8nAppConfig>,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `file` instead of `config.toml` when given
    ///
    /// An explicit file must exist. The result is validated.
    pub fn load_from(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("selection.min_contacts", 3)?
            .set_default("selection.max_contacts", 5)?
            .set_default("logging.filter", "info")?
            .add_source(file_source)
            // Override with environment variables (e.g., SOS__GATEWAY__TIMEOUT_SECS)
            .add_source(
                config::Environment::with_prefix("SOS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("alert.default_channels")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Whether running in production
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Some(Environment::Production)
    }

    /// Names of credentials that are not configured
    #[must_use]
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.directory.has_api_key() {
            missing.push("directory.api_key");
        }
        if !self.gateway.has_api_key() {
            missing.push("gateway.api_key");
        }
        if self.n8n.as_ref().is_some_and(|n8n| !n8n.has_api_key()) {
            missing.push("n8n.api_key");
        }
        missing
    }

    /// Validate cross-field constraints
    ///
    /// Missing credentials are only warned about, and only in production.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.selection
            .to_policy()
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("selection: {e}")))?;

        if self.alert.default_channels.is_empty() {
            return Err(config::ConfigError::Message(
                "alert.default_channels must name at least one channel".to_string(),
            ));
        }

        if self.is_production() {
            for key in self.missing_credentials() {
                warn!(key, "Credential not configured");
            }
        }
        Ok(())
    }
}
