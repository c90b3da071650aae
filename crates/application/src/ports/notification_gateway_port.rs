//! Notification gateway port
//!
//! One method per delivery channel. `Ok(())` means the gateway accepted the
//! message; every other outcome is an error.

use async_trait::async_trait;
use domain::Contact;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the multi-channel notification gateway
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationGatewayPort: Send + Sync {
    /// Send an SMS to the contact's phone
    async fn send_sms(&self, contact: &Contact, message: &str) -> Result<(), ApplicationError>;

    /// Send an email to the contact's address
    async fn send_email(
        &self,
        contact: &Contact,
        subject: &str,
        message: &str,
    ) -> Result<(), ApplicationError>;

    /// Place a voice call reading out the message
    async fn initiate_call(&self, contact: &Contact, message: &str)
    -> Result<(), ApplicationError>;

    /// Push an in-app SOS notification to the contact
    async fn send_app_notification(
        &self,
        contact: &Contact,
        message: &str,
    ) -> Result<(), ApplicationError>;
}
