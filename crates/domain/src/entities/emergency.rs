//! Emergency raised by a driver or an operator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{AlertPriority, EmergencyType};

/// Emergency report, as posted to the SOS workflow webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyData {
    /// Kind of emergency
    pub emergency_type: EmergencyType,
    /// When the emergency was raised
    pub timestamp: DateTime<Utc>,
    /// Vehicle involved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    /// Where it happened
    pub location: String,
    /// Who raised it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    /// Urgency
    pub priority: AlertPriority,
    /// Free-text description
    pub description: String,
}

impl EmergencyData {
    /// Create an emergency raised now, with the type's default priority
    pub fn new(emergency_type: EmergencyType, location: impl Into<String>) -> Self {
        Self {
            emergency_type,
            timestamp: Utc::now(),
            vehicle_id: None,
            location: location.into(),
            driver_name: None,
            priority: emergency_type.default_priority(),
            description: Self::default_description(emergency_type, None),
        }
    }

    /// Attach the vehicle involved
    #[must_use]
    pub fn with_vehicle(mut self, vehicle_id: impl Into<String>) -> Self {
        self.vehicle_id = Some(vehicle_id.into());
        self
    }

    /// Attach the driver; refreshes the generated description
    #[must_use]
    pub fn with_driver(mut self, driver_name: impl Into<String>) -> Self {
        let driver_name = driver_name.into();
        if self.description == Self::default_description(self.emergency_type, None) {
            self.description = Self::default_description(self.emergency_type, Some(&driver_name));
        }
        self.driver_name = Some(driver_name);
        self
    }

    /// Override the priority
    #[must_use]
    pub const fn with_priority(mut self, priority: AlertPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Override the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Alert text sent to responders
    #[must_use]
    pub fn alert_message(&self) -> String {
        let mut message = format!(
            "SOS {} emergency at {}: {}",
            self.emergency_type.label(),
            self.location,
            self.description
        );
        if let Some(vehicle) = &self.vehicle_id {
            message.push_str(&format!(" (vehicle {vehicle})"));
        }
        message
    }

    fn default_description(emergency_type: EmergencyType, driver: Option<&str>) -> String {
        match driver {
            Some(driver) => format!("{} alert raised by {driver}", emergency_type.label()),
            None => format!("{} alert raised", emergency_type.label()),
        }
    }
}
