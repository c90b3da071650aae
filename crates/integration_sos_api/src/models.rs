//! Notification gateway request bodies

use serde::Serialize;

/// `data.type` tag of SOS push notifications
pub const SOS_ALERT_TYPE: &str = "SOS_ALERT";

/// `POST /sms`
#[derive(Debug, Clone, Serialize)]
pub struct SmsRequest<'a> {
    /// Recipient phone number
    pub to: &'a str,
    /// Text body
    pub message: &'a str,
}

/// `POST /email`
#[derive(Debug, Clone, Serialize)]
pub struct EmailRequest<'a> {
    /// Recipient address
    pub to: &'a str,
    /// Subject line
    pub subject: &'a str,
    /// Body
    pub message: &'a str,
}

/// `POST /call`
#[derive(Debug, Clone, Serialize)]
pub struct CallRequest<'a> {
    /// Phone number to call
    pub to: &'a str,
    /// Text read out by the voice service
    pub message: &'a str,
}

/// Structured payload of a push notification
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData<'a> {
    /// Notification kind
    #[serde(rename = "type")]
    pub kind: &'a str,
    /// Whether the app must ask the user to acknowledge
    pub requires_action: bool,
}

impl NotificationData<'static> {
    /// Payload of an SOS alert awaiting acknowledgement
    #[must_use]
    pub const fn sos_alert() -> Self {
        Self {
            kind: SOS_ALERT_TYPE,
            requires_action: true,
        }
    }
}

/// `POST /notification`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppNotificationRequest<'a> {
    /// Directory id of the recipient
    pub user_id: &'a str,
    /// Text body
    pub message: &'a str,
    /// Delivery priority (`high`, `medium`, `low`)
    pub priority: &'a str,
    /// Structured payload
    pub data: NotificationData<'a>,
}
