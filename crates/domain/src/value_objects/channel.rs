//! Notification channel value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A notification medium a contact can be reached on
///
/// The declaration order is the dispatch order: a contact is texted before
/// being emailed, called and finally pushed to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// SMS text message
    Sms,
    /// Email
    Email,
    /// Voice call
    Call,
    /// In-app push notification
    App,
}

impl Channel {
    /// All channels in dispatch order
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Sms, Self::Email, Self::Call, Self::App]
    }

    /// Wire name of the channel
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Email => "email",
            Self::Call => "call",
            Self::App => "app",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sms" => Ok(Self::Sms),
            "email" | "mail" => Ok(Self::Email),
            "call" | "voice" => Ok(Self::Call),
            "app" | "push" => Ok(Self::App),
            _ => Err(DomainError::InvalidChannel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_dispatch_order() {
        assert_eq!(
            Channel::all(),
            [Channel::Sms, Channel::Email, Channel::Call, Channel::App]
        );
    }

    #[test]
    fn ordering_follows_dispatch_order() {
        let mut channels = vec![Channel::App, Channel::Sms, Channel::Call, Channel::Email];
        channels.sort();
        assert_eq!(channels, Channel::all().to_vec());
    }

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!("SMS".parse::<Channel>().unwrap(), Channel::Sms);
        assert_eq!("push".parse::<Channel>().unwrap(), Channel::App);
        assert_eq!(" voice ".parse::<Channel>().unwrap(), Channel::Call);
        assert!("fax".parse::<Channel>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Channel::Email).unwrap();
        assert_eq!(json, "\"email\"");
        let parsed: Channel = serde_json::from_str("\"app\"").unwrap();
        assert_eq!(parsed, Channel::App);
    }
}
