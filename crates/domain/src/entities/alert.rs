//! Alert options and per-channel dispatch outcome

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::{AlertPriority, Channel};

/// What to send and over which channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertOptions {
    /// Alert body
    pub message: String,
    /// Urgency
    #[serde(default)]
    pub priority: AlertPriority,
    /// Requested channels; order and duplicates are irrelevant
    pub channels: Vec<Channel>,
}

impl AlertOptions {
    /// Create options requesting every channel
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            priority: AlertPriority::default(),
            channels: Channel::all().to_vec(),
        }
    }

    /// Set the priority
    #[must_use]
    pub const fn with_priority(mut self, priority: AlertPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Restrict to the given channels
    #[must_use]
    pub fn with_channels(mut self, channels: impl IntoIterator<Item = Channel>) -> Self {
        self.channels = channels.into_iter().collect();
        self
    }

    /// Whether `channel` was requested
    #[must_use]
    pub fn requests(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }
}

/// Outcome of alerting one contact
///
/// Only invoked channels appear in `channels`. `success` holds when at
/// least one of them delivered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DispatchResult {
    /// At least one channel delivered
    pub success: bool,
    /// Delivery outcome per invoked channel
    pub channels: BTreeMap<Channel, bool>,
}

impl DispatchResult {
    /// Record the outcome of one channel
    pub fn record(&mut self, channel: Channel, delivered: bool) {
        self.channels.insert(channel, delivered);
        self.success = self.channels.values().any(|&ok| ok);
    }

    /// Outcome of a channel, `None` when it was not invoked
    #[must_use]
    pub fn channel(&self, channel: Channel) -> Option<bool> {
        self.channels.get(&channel).copied()
    }

    /// Whether no channel was invoked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl FromIterator<(Channel, bool)> for DispatchResult {
    fn from_iter<T: IntoIterator<Item = (Channel, bool)>>(iter: T) -> Self {
        let mut result = Self::default();
        for (channel, delivered) in iter {
            result.record(channel, delivered);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_unsuccessful() {
        let result = DispatchResult::default();
        assert!(!result.success);
        assert!(result.is_empty());
    }

    #[test]
    fn one_delivered_channel_is_enough() {
        let result: DispatchResult = [
            (Channel::Sms, false),
            (Channel::Email, false),
            (Channel::Call, true),
        ]
        .into_iter()
        .collect();

        assert!(result.success);
        assert_eq!(result.channel(Channel::Call), Some(true));
        assert_eq!(result.channel(Channel::App), None);
    }

    #[test]
    fn all_failed_is_unsuccessful() {
        let result: DispatchResult = [(Channel::Sms, false), (Channel::App, false)]
            .into_iter()
            .collect();
        assert!(!result.success);
        assert_eq!(result.channels.len(), 2);
    }

    #[test]
    fn serializes_channels_as_object() {
        let result: DispatchResult = [(Channel::Sms, true)].into_iter().collect();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "channels": {"sms": true}}));
    }

    #[test]
    fn options_request_all_channels_by_default() {
        let options = AlertOptions::new("help");
        for channel in Channel::all() {
            assert!(options.requests(channel));
        }
        let options = options.with_channels([Channel::Sms]);
        assert!(options.requests(Channel::Sms));
        assert!(!options.requests(Channel::Email));
    }
}
