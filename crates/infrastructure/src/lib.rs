//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the SOS API and n8n clients,
//! and provides configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AlertAppConfig, ApiEndpointConfig, AppConfig, Environment, N8nAppConfig, SelectionConfig,
};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};
