//! Notification gateway client
//!
//! The gateway acknowledges an accepted message with exactly HTTP 200; any
//! other status, including other 2xx codes, is reported as
//! [`SosApiError::UnexpectedStatus`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::SosApiConfig;
use crate::error::SosApiError;
use crate::models::{
    AppNotificationRequest, CallRequest, EmailRequest, NotificationData, SmsRequest,
};

/// Gateway client trait
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// `POST /sms`
    async fn send_sms(&self, to: &str, message: &str) -> Result<(), SosApiError>;

    /// `POST /email`
    async fn send_email(&self, to: &str, subject: &str, message: &str)
    -> Result<(), SosApiError>;

    /// `POST /call`
    async fn initiate_call(&self, to: &str, message: &str) -> Result<(), SosApiError>;

    /// `POST /notification`
    async fn send_notification(
        &self,
        user_id: &str,
        message: &str,
        priority: &str,
    ) -> Result<(), SosApiError>;
}

/// HTTP implementation of [`GatewayClient`]
#[derive(Debug, Clone)]
pub struct HttpGatewayClient {
    client: Client,
    config: SosApiConfig,
}

impl HttpGatewayClient {
    /// Create a new gateway client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: SosApiConfig) -> Result<Self, SosApiError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SosApiError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Issue an authenticated JSON POST, accepting only HTTP 200
    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), SosApiError> {
        let url = self.config.endpoint(path);
        debug!(url = %url, "Posting to notification gateway");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| SosApiError::from_transport(&e, self.config.timeout_secs))?;

        let status = response.status();
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(SosApiError::from_status(status, path))
        }
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    #[instrument(skip(self, message))]
    async fn send_sms(&self, to: &str, message: &str) -> Result<(), SosApiError> {
        self.post("/sms", &SmsRequest { to, message }).await
    }

    #[instrument(skip(self, message))]
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), SosApiError> {
        self.post(
            "/email",
            &EmailRequest {
                to,
                subject,
                message,
            },
        )
        .await
    }

    #[instrument(skip(self, message))]
    async fn initiate_call(&self, to: &str, message: &str) -> Result<(), SosApiError> {
        self.post("/call", &CallRequest { to, message }).await
    }

    #[instrument(skip(self, message))]
    async fn send_notification(
        &self,
        user_id: &str,
        message: &str,
        priority: &str,
    ) -> Result<(), SosApiError> {
        self.post(
            "/notification",
            &AppNotificationRequest {
                user_id,
                message,
                priority,
                data: NotificationData::sos_alert(),
            },
        )
        .await
    }
}
