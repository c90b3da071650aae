//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber.

mod logging;

pub use logging::{LoggingConfig, TelemetryError, init_logging};
