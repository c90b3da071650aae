//! Vehicle record as served by the directory API
//!
//! Only `emergency_contacts` takes part in contact selection. The remaining
//! fields are carried for display and tolerated as absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Driver assigned to a vehicle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Driver {
    /// Directory identifier
    #[serde(default)]
    pub id: String,
    /// Full name
    #[serde(default)]
    pub name: String,
    /// Phone number
    #[serde(default)]
    pub phone: String,
}

/// Last known position of a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Reverse-geocoded address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A waypoint on a planned route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    /// Location description
    pub location: String,
    /// Expected arrival time
    pub estimated_arrival: DateTime<Utc>,
}

/// Planned route of a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Departure location
    pub origin: String,
    /// Arrival location
    pub destination: String,
    /// Intermediate checkpoints
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
}

/// Cargo description of an exceptional transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportDetails {
    /// Cargo description
    pub cargo: String,
    /// Handling requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requirements: Option<Vec<String>>,
}

/// A vehicle with its predefined emergency contacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Directory identifier
    pub id: String,
    /// Licence plate
    #[serde(default)]
    pub registration_number: String,
    /// Vehicle category
    #[serde(rename = "type", default)]
    pub vehicle_type: String,
    /// Assigned driver
    #[serde(default)]
    pub driver: Driver,
    /// Last known position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<GeoPosition>,
    /// Planned route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
    /// Cargo details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_details: Option<TransportDetails>,
    /// Predefined contact ids, in escalation order
    #[serde(default)]
    pub emergency_contacts: Vec<String>,
}

impl Vehicle {
    /// Create a vehicle with the given predefined contacts
    pub fn new<I, S>(id: impl Into<String>, emergency_contacts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            registration_number: String::new(),
            vehicle_type: String::new(),
            driver: Driver::default(),
            current_location: None,
            route: None,
            transport_details: None,
            emergency_contacts: emergency_contacts.into_iter().map(Into::into).collect(),
        }
    }
}
