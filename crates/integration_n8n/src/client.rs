//! n8n HTTP client
//!
//! HTTP client for the n8n public REST API and the SOS webhook.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ActivationRequest, DataEnvelope, ErrorBody, Execution, Workflow};

/// Header carrying the n8n API key
const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// n8n client errors
#[derive(Debug, Error)]
pub enum N8nError {
    /// Connection to n8n failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// n8n answered with a non-2xx status
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the response body, or `HTTP <status>`
        message: String,
    },

    /// Failed to parse response from n8n
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl N8nError {
    fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// HTTP status of an API error, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// n8n configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct N8nConfig {
    /// REST API base URL (default: <http://localhost:5678>)
    ///
    /// Paths such as `/workflows` are appended verbatim, so deployments
    /// exposing the API under `/api/v1` should include that prefix here.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key sent as `X-N8N-API-KEY`
    #[serde(default)]
    pub api_key: String,

    /// Full URL of the SOS webhook
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for N8nConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("N8nConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("webhook_url", &self.webhook_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_api_url() -> String {
    "http://localhost:5678".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for N8nConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            webhook_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl N8nConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a URL is not http(s) or the timeout is zero.
    pub fn validate(&self) -> Result<(), N8nError> {
        check_url("api_url", &self.api_url)?;
        if let Some(webhook) = &self.webhook_url {
            check_url("webhook_url", webhook)?;
        }
        if self.timeout_secs == 0 {
            return Err(N8nError::Configuration(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_url(field: &str, url: &str) -> Result<(), N8nError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(N8nError::Configuration(format!(
            "{field} must be an http(s) URL: {url}"
        )))
    }
}

/// n8n client trait
#[async_trait]
pub trait N8nClient: Send + Sync {
    /// POST a JSON payload to the SOS webhook
    async fn trigger_webhook(&self, payload: &serde_json::Value) -> Result<(), N8nError>;

    /// List all workflows
    async fn list_workflows(&self) -> Result<Vec<Workflow>, N8nError>;

    /// List the most recent executions of a workflow
    async fn list_executions(
        &self,
        workflow_id: &str,
        limit: u32,
    ) -> Result<Vec<Execution>, N8nError>;

    /// Activate or deactivate a workflow, returning the updated workflow
    async fn set_workflow_active(
        &self,
        workflow_id: &str,
        active: bool,
    ) -> Result<Workflow, N8nError>;

    /// Execute a workflow with the given input
    async fn execute_workflow(
        &self,
        workflow_id: &str,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, N8nError>;
}

/// reqwest-backed n8n client
#[derive(Debug, Clone)]
pub struct HttpN8nClient {
    client: Client,
    config: N8nConfig,
}

impl HttpN8nClient {
    /// Create a new n8n client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: N8nConfig) -> Result<Self, N8nError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| N8nError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Whether a webhook URL is configured
    #[must_use]
    pub const fn has_webhook(&self) -> bool {
        self.config.webhook_url.is_some()
    }

    /// Build an authenticated API request
    fn api(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_url.trim_end_matches('/'), path);
        debug!(%method, url = %url, "n8n API request");
        self.client
            .request(method, url)
            .header(API_KEY_HEADER, &self.config.api_key)
    }

    /// Send a request, turning non-2xx responses into [`N8nError::Api`]
    async fn send(&self, request: RequestBuilder) -> Result<Response, N8nError> {
        let response = request
            .send()
            .await
            .map_err(|e| N8nError::from_transport(&e, self.config.timeout_secs))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        warn!(status = status.as_u16(), message = %message, "n8n request rejected");
        Err(N8nError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, N8nError> {
        response
            .json()
            .await
            .map_err(|e| N8nError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl N8nClient for HttpN8nClient {
    #[instrument(skip(self, payload))]
    async fn trigger_webhook(&self, payload: &serde_json::Value) -> Result<(), N8nError> {
        let url = self
            .config
            .webhook_url
            .as_deref()
            .ok_or_else(|| N8nError::Configuration("webhook_url is not configured".into()))?;

        self.send(self.client.post(url).json(payload)).await?;
        debug!("SOS webhook accepted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_workflows(&self) -> Result<Vec<Workflow>, N8nError> {
        let response = self.send(self.api(Method::GET, "/workflows")).await?;
        let envelope: DataEnvelope<Workflow> = Self::decode(response).await?;
        Ok(envelope.data)
    }

    #[instrument(skip(self))]
    async fn list_executions(
        &self,
        workflow_id: &str,
        limit: u32,
    ) -> Result<Vec<Execution>, N8nError> {
        let limit = limit.to_string();
        let request = self
            .api(Method::GET, "/executions")
            .query(&[("workflowId", workflow_id), ("limit", limit.as_str())]);
        let envelope: DataEnvelope<Execution> = Self::decode(self.send(request).await?).await?;
        Ok(envelope.data)
    }

    #[instrument(skip(self))]
    async fn set_workflow_active(
        &self,
        workflow_id: &str,
        active: bool,
    ) -> Result<Workflow, N8nError> {
        let request = self
            .api(Method::PATCH, &format!("/workflows/{workflow_id}"))
            .json(&ActivationRequest { active });
        Self::decode(self.send(request).await?).await
    }

    #[instrument(skip(self, payload))]
    async fn execute_workflow(
        &self,
        workflow_id: &str,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, N8nError> {
        let request = self
            .api(Method::POST, &format!("/workflows/{workflow_id}/execute"))
            .json(payload);
        let body = self
            .send(request)
            .await?
            .text()
            .await
            .map_err(|e| N8nError::RequestFailed(e.to_string()))?;

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| N8nError::ParseError(e.to_string()))
    }
}
