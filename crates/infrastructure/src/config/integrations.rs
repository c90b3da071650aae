//! Integration configurations: SOS directory, notification gateway, n8n.

use integration_n8n::N8nConfig;
use integration_sos_api::SosApiConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// SOS API Configuration
// ==============================

/// Connection settings for the SOS directory or notification gateway
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiEndpointConfig {
    /// Base URL (e.g., <http://localhost:3001/api>)
    #[serde(default = "default_sos_base_url")]
    pub base_url: String,

    /// Bearer token (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ApiEndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiEndpointConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_sos_base_url() -> String {
    "http://localhost:3001/api".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for ApiEndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_sos_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ApiEndpointConfig {
    /// Whether an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Convert to `integration_sos_api`'s `SosApiConfig`
    #[must_use]
    pub fn to_sos_api_config(&self) -> SosApiConfig {
        SosApiConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string())
                .unwrap_or_default(),
            timeout_secs: self.timeout_secs,
        }
    }
}

// ==============================
// n8n Configuration
// ==============================

/// n8n workflow engine configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct N8nAppConfig {
    /// REST API base URL (default: <http://localhost:5678>)
    #[serde(default = "default_n8n_api_url")]
    pub api_url: String,

    /// API key sent as `X-N8N-API-KEY` (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// SOS webhook URL; when unset, emergencies are dispatched directly only
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for N8nAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("N8nAppConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("webhook_url", &self.webhook_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_n8n_api_url() -> String {
    "http://localhost:5678".to_string()
}

impl Default for N8nAppConfig {
    fn default() -> Self {
        Self {
            api_url: default_n8n_api_url(),
            api_key: None,
            webhook_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl N8nAppConfig {
    /// Whether an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Convert to `integration_n8n`'s `N8nConfig`
    #[must_use]
    pub fn to_n8n_config(&self) -> N8nConfig {
        N8nConfig {
            api_url: self.api_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string())
                .unwrap_or_default(),
            webhook_url: self.webhook_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
