//! Selection and alerting settings.

use application::{AlertConfig, DEFAULT_EMAIL_SUBJECT, SelectionPolicy};
use domain::Channel;
use serde::{Deserialize, Serialize};

/// Bounds on the number of contacts selected per emergency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Below this many contacts the zone is consulted (default: 3)
    #[serde(default = "default_min_contacts")]
    pub min_contacts: usize,

    /// Maximum contacts alerted (default: 5)
    #[serde(default = "default_max_contacts")]
    pub max_contacts: usize,
}

const fn default_min_contacts() -> usize {
    3
}

const fn default_max_contacts() -> usize {
    5
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_contacts: default_min_contacts(),
            max_contacts: default_max_contacts(),
        }
    }
}

impl SelectionConfig {
    /// Convert to the application's `SelectionPolicy`
    #[must_use]
    pub const fn to_policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            min_contacts: self.min_contacts,
            max_contacts: self.max_contacts,
        }
    }
}

/// Alert dispatch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertAppConfig {
    /// Subject of alert emails (default: "ALERTE SOS")
    #[serde(default = "default_email_subject")]
    pub email_subject: String,

    /// Channels used when a command does not name any (default: all)
    #[serde(default = "default_channels")]
    pub default_channels: Vec<Channel>,
}

fn default_email_subject() -> String {
    DEFAULT_EMAIL_SUBJECT.to_string()
}

fn default_channels() -> Vec<Channel> {
    Channel::all().to_vec()
}

impl Default for AlertAppConfig {
    fn default() -> Self {
        Self {
            email_subject: default_email_subject(),
            default_channels: default_channels(),
        }
    }
}

impl AlertAppConfig {
    /// Convert to the application's `AlertConfig`
    #[must_use]
    pub fn to_alert_config(&self) -> AlertConfig {
        AlertConfig {
            email_subject: self.email_subject.clone(),
        }
    }
}
