//! Multi-channel alert dispatch
//!
//! Delivers an alert to one contact over every channel that the caller
//! requested and the contact opted into. Channels are attempted one after
//! the other and independently: a failing channel is recorded as `false`
//! and never prevents the next one from being tried.

use std::sync::Arc;

use domain::{AlertOptions, Channel, Contact, DispatchResult};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::NotificationGatewayPort;

/// Default subject line of alert emails
pub const DEFAULT_EMAIL_SUBJECT: &str = "ALERTE SOS";

/// Configuration for the alert service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertConfig {
    /// Subject line of alert emails
    pub email_subject: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            email_subject: DEFAULT_EMAIL_SUBJECT.to_string(),
        }
    }
}

/// Service dispatching alerts through the notification gateway
pub struct AlertService {
    gateway: Arc<dyn NotificationGatewayPort>,
    config: AlertConfig,
}

impl std::fmt::Debug for AlertService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AlertService {
    /// Create a service with the default configuration
    #[must_use]
    pub fn new(gateway: Arc<dyn NotificationGatewayPort>) -> Self {
        Self::with_config(gateway, AlertConfig::default())
    }

    /// Create a service with a custom configuration
    #[must_use]
    pub fn with_config(gateway: Arc<dyn NotificationGatewayPort>, config: AlertConfig) -> Self {
        Self { gateway, config }
    }

    /// Send an SMS; `false` on any failure
    #[instrument(skip(self, contact, message), fields(contact_id = %contact.id))]
    pub async fn send_sms(&self, contact: &Contact, message: &str) -> bool {
        Self::delivered(
            Channel::Sms,
            contact,
            self.gateway.send_sms(contact, message).await,
        )
    }

    /// Send an email; `false` on any failure
    #[instrument(skip(self, contact, message), fields(contact_id = %contact.id))]
    pub async fn send_email(&self, contact: &Contact, subject: &str, message: &str) -> bool {
        Self::delivered(
            Channel::Email,
            contact,
            self.gateway.send_email(contact, subject, message).await,
        )
    }

    /// Place a voice call; `false` on any failure
    #[instrument(skip(self, contact, message), fields(contact_id = %contact.id))]
    pub async fn initiate_call(&self, contact: &Contact, message: &str) -> bool {
        Self::delivered(
            Channel::Call,
            contact,
            self.gateway.initiate_call(contact, message).await,
        )
    }

    /// Push an in-app notification; `false` on any failure
    #[instrument(skip(self, contact, message), fields(contact_id = %contact.id))]
    pub async fn send_app_notification(&self, contact: &Contact, message: &str) -> bool {
        Self::delivered(
            Channel::App,
            contact,
            self.gateway.send_app_notification(contact, message).await,
        )
    }

    /// Alert a contact over the requested, opted-in channels
    ///
    /// Channels that are not both requested and opted into are left out of
    /// the result entirely.
    #[instrument(skip(self, contact, options), fields(
        contact_id = %contact.id,
        priority = %options.priority,
    ))]
    pub async fn alert_contact(&self, contact: &Contact, options: &AlertOptions) -> DispatchResult {
        let mut result = DispatchResult::default();

        for channel in Channel::all() {
            if !options.requests(channel) {
                continue;
            }
            if !contact.notification_preferences.allows(channel) {
                debug!(%channel, "Contact opted out of channel");
                continue;
            }

            let delivered = match channel {
                Channel::Sms => self.send_sms(contact, &options.message).await,
                Channel::Email => {
                    self.send_email(contact, &self.config.email_subject, &options.message)
                        .await
                },
                Channel::Call => self.initiate_call(contact, &options.message).await,
                Channel::App => self.send_app_notification(contact, &options.message).await,
            };
            result.record(channel, delivered);
        }

        info!(
            success = result.success,
            attempted = result.channels.len(),
            "Alerted contact"
        );
        result
    }

    fn delivered(channel: Channel, contact: &Contact, outcome: Result<(), ApplicationError>) -> bool {
        match outcome {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    %channel,
                    contact = %contact.name,
                    error = %e,
                    "Failed to deliver alert"
                );
                false
            },
        }
    }
}
