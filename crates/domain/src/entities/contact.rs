//! Responder contact as served by the directory API

use serde::{Deserialize, Serialize};

use crate::value_objects::{Channel, EmergencyType};

/// Per-channel opt-in of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)] // One flag per channel
pub struct NotificationPreferences {
    /// Accepts SMS
    #[serde(default)]
    pub sms: bool,
    /// Accepts email
    #[serde(default)]
    pub email: bool,
    /// Accepts voice calls
    #[serde(default)]
    pub call: bool,
    /// Accepts in-app push notifications
    #[serde(default)]
    pub app: bool,
}

impl NotificationPreferences {
    /// Preferences with every channel enabled
    #[must_use]
    pub const fn all() -> Self {
        Self {
            sms: true,
            email: true,
            call: true,
            app: true,
        }
    }

    /// Whether the contact opted into `channel`
    #[must_use]
    pub const fn allows(&self, channel: Channel) -> bool {
        match channel {
            Channel::Sms => self.sms,
            Channel::Email => self.email,
            Channel::Call => self.call,
            Channel::App => self.app,
        }
    }
}

/// A responder profile
///
/// Lower `priority` means more urgent: lists of contacts are sorted
/// ascending on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Directory identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Function within the organisation (dispatcher, paramedic, ...)
    #[serde(default)]
    pub role: String,
    /// Phone number used for SMS and calls
    #[serde(default)]
    pub phone: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Escalation rank, lower first
    #[serde(default)]
    pub priority: i32,
    /// Whether the contact can currently respond
    #[serde(default)]
    pub is_available: bool,
    /// Geographic zones the contact covers
    #[serde(default)]
    pub zones: Vec<String>,
    /// Emergency types the contact is qualified for
    #[serde(default)]
    pub specialties: Vec<String>,
    /// Channel opt-ins
    #[serde(default)]
    pub notification_preferences: NotificationPreferences,
}

impl Contact {
    /// Create an available contact with no channels enabled
    pub fn new(id: impl Into<String>, name: impl Into<String>, priority: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: String::new(),
            phone: String::new(),
            email: String::new(),
            priority,
            is_available: true,
            zones: Vec::new(),
            specialties: Vec::new(),
            notification_preferences: NotificationPreferences::default(),
        }
    }

    /// Set the role
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Set the phone number
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Set the email address
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set availability
    #[must_use]
    pub const fn with_availability(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }

    /// Add a covered zone
    #[must_use]
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zones.push(zone.into());
        self
    }

    /// Add a specialty tag
    #[must_use]
    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialties.push(specialty.into());
        self
    }

    /// Set channel preferences
    #[must_use]
    pub const fn with_preferences(mut self, preferences: NotificationPreferences) -> Self {
        self.notification_preferences = preferences;
        self
    }

    /// Whether the contact carries `specialty`
    #[must_use]
    pub fn has_specialty(&self, specialty: &str) -> bool {
        self.specialties.iter().any(|s| s == specialty)
    }

    /// Whether the contact is qualified for the given emergency type
    /// and every additionally required specialty
    #[must_use]
    pub fn is_qualified_for(&self, emergency_type: EmergencyType, required: &[String]) -> bool {
        self.has_specialty(emergency_type.as_str())
            && required.iter().all(|s| self.has_specialty(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_wire_format() {
        let json = serde_json::json!({
            "id": "c1",
            "name": "Alice",
            "role": "paramedic",
            "phone": "+33600000001",
            "email": "alice@example.com",
            "priority": 1,
            "isAvailable": true,
            "zones": ["north"],
            "specialties": ["medical"],
            "notificationPreferences": {"sms": true, "email": false, "call": true, "app": false}
        });

        let contact: Contact = serde_json::from_value(json).unwrap();
        assert_eq!(contact.id, "c1");
        assert!(contact.is_available);
        assert!(contact.notification_preferences.sms);
        assert!(!contact.notification_preferences.email);
        assert!(contact.has_specialty("medical"));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let json = serde_json::json!({"id": "c2", "name": "Bob", "priority": 3});
        let contact: Contact = serde_json::from_value(json).unwrap();
        assert!(contact.zones.is_empty());
        assert!(contact.specialties.is_empty());
        assert!(!contact.is_available);
        assert_eq!(contact.notification_preferences, NotificationPreferences::default());
    }

    #[test]
    fn preferences_allow_only_enabled_channels() {
        let prefs = NotificationPreferences {
            sms: true,
            email: false,
            call: true,
            app: false,
        };
        assert!(prefs.allows(Channel::Sms));
        assert!(!prefs.allows(Channel::Email));
        assert!(prefs.allows(Channel::Call));
        assert!(!prefs.allows(Channel::App));
    }

    #[test]
    fn qualification_requires_type_and_extra_specialties() {
        let contact = Contact::new("c3", "Carol", 2)
            .with_specialty("medical")
            .with_specialty("hazmat");

        assert!(contact.is_qualified_for(EmergencyType::Medical, &[]));
        assert!(contact.is_qualified_for(EmergencyType::Medical, &["hazmat".to_string()]));
        assert!(!contact.is_qualified_for(EmergencyType::Medical, &["diving".to_string()]));
        assert!(!contact.is_qualified_for(EmergencyType::Security, &[]));
    }
}
