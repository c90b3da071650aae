//! Contact selection criteria

use serde::{Deserialize, Serialize};

use super::EmergencyData;
use crate::value_objects::{AlertPriority, EmergencyType};

/// Input to contact selection, built per emergency and never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSelectionCriteria {
    /// Kind of emergency, matched against contact specialties
    pub emergency_type: EmergencyType,
    /// Free-form location, matched to zones by the directory
    pub location: String,
    /// Urgency of the alert
    #[serde(default)]
    pub priority: AlertPriority,
    /// Vehicle whose predefined contacts seed the selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    /// Specialties a contact needs on top of the emergency type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_specialties: Vec<String>,
}

impl ContactSelectionCriteria {
    /// Create criteria for an emergency at a location
    pub fn new(emergency_type: EmergencyType, location: impl Into<String>) -> Self {
        Self {
            emergency_type,
            location: location.into(),
            priority: emergency_type.default_priority(),
            vehicle_id: None,
            required_specialties: Vec::new(),
        }
    }

    /// Set the priority
    #[must_use]
    pub const fn with_priority(mut self, priority: AlertPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Seed the selection from a vehicle
    #[must_use]
    pub fn with_vehicle(mut self, vehicle_id: impl Into<String>) -> Self {
        self.vehicle_id = Some(vehicle_id.into());
        self
    }

    /// Require an additional specialty
    #[must_use]
    pub fn with_required_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.required_specialties.push(specialty.into());
        self
    }
}

impl From<&EmergencyData> for ContactSelectionCriteria {
    fn from(emergency: &EmergencyData) -> Self {
        Self {
            emergency_type: emergency.emergency_type,
            location: emergency.location.clone(),
            priority: emergency.priority,
            vehicle_id: emergency.vehicle_id.clone(),
            required_specialties: Vec::new(),
        }
    }
}
