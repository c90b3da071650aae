//! n8n workflow engine integration
//!
//! Client for the n8n REST API (workflow listing, activation, manual
//! execution, execution history) and for the SOS webhook that starts the
//! emergency workflow.
//!
//! API requests authenticate with the `X-N8N-API-KEY` header. The webhook
//! is a public n8n endpoint and is called without credentials.

mod client;
mod models;

pub use client::{HttpN8nClient, N8nClient, N8nConfig, N8nError};
pub use models::{Execution, Workflow};
