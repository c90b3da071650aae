//! Gateway adapter - Implements NotificationGatewayPort using integration_sos_api

use application::{ApplicationError, NotificationGatewayPort};
use async_trait::async_trait;
use domain::Contact;
use integration_sos_api::{GatewayClient, HttpGatewayClient, SosApiConfig};
use tracing::instrument;

use super::map_sos_error;

const SERVICE: &str = "gateway";

/// Priority sent with every push notification
///
/// The alert's own priority is not forwarded; an SOS push is always urgent.
pub const PUSH_PRIORITY: &str = "high";

/// Adapter for the notification gateway
///
/// Addresses SMS and calls to the contact's phone, email to the contact's
/// address and push notifications to the contact id.
#[derive(Debug)]
pub struct GatewayAdapter {
    client: HttpGatewayClient,
}

impl GatewayAdapter {
    /// Create an adapter for the given endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: SosApiConfig) -> Result<Self, ApplicationError> {
        let client = HttpGatewayClient::new(config).map_err(|e| map_sos_error(SERVICE, e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NotificationGatewayPort for GatewayAdapter {
    #[instrument(skip(self, contact, message), fields(contact_id = %contact.id))]
    async fn send_sms(&self, contact: &Contact, message: &str) -> Result<(), ApplicationError> {
        self.client
            .send_sms(&contact.phone, message)
            .await
            .map_err(|e| map_sos_error(SERVICE, e))
    }

    #[instrument(skip(self, contact, message), fields(contact_id = %contact.id))]
    async fn send_email(
        &self,
        contact: &Contact,
        subject: &str,
        message: &str,
    ) -> Result<(), ApplicationError> {
        self.client
            .send_email(&contact.email, subject, message)
            .await
            .map_err(|e| map_sos_error(SERVICE, e))
    }

    #[instrument(skip(self, contact, message), fields(contact_id = %contact.id))]
    async fn initiate_call(
        &self,
        contact: &Contact,
        message: &str,
    ) -> Result<(), ApplicationError> {
        self.client
            .initiate_call(&contact.phone, message)
            .await
            .map_err(|e| map_sos_error(SERVICE, e))
    }

    #[instrument(skip(self, contact, message), fields(contact_id = %contact.id))]
    async fn send_app_notification(
        &self,
        contact: &Contact,
        message: &str,
    ) -> Result<(), ApplicationError> {
        self.client
            .send_notification(&contact.id, message, PUSH_PRIORITY)
            .await
            .map_err(|e| map_sos_error(SERVICE, e))
    }
}
