//! Application layer - Use cases and orchestration
//!
//! Contains contact selection, alert dispatch and the end-to-end emergency
//! use case, plus the port definitions they depend on. Adapters in the
//! infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
