//! SOS API integration
//!
//! HTTP clients for the two halves of the SOS backend:
//!
//! - the responder directory ([`DirectoryClient`]), serving vehicles and
//!   contacts, and
//! - the notification gateway ([`GatewayClient`]), delivering SMS, email,
//!   voice calls and in-app push notifications.
//!
//! Both authenticate every request with a static bearer token and share
//! [`SosApiConfig`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_sos_api::{DirectoryClient, HttpDirectoryClient, SosApiConfig};
//!
//! let config = SosApiConfig::new("http://localhost:3001/api", "secret");
//! let client = HttpDirectoryClient::new(config)?;
//! let vehicle = client.get_vehicle("V1").await?;
//! ```

mod config;
mod directory;
mod error;
mod gateway;
mod models;

pub use config::SosApiConfig;
pub use directory::{DirectoryClient, HttpDirectoryClient};
pub use error::SosApiError;
pub use gateway::{GatewayClient, HttpGatewayClient};
pub use models::{
    AppNotificationRequest, CallRequest, EmailRequest, NotificationData, SmsRequest,
    SOS_ALERT_TYPE,
};
