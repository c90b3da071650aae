//! Directory port
//!
//! Read-only access to the responder directory: vehicles and contacts.

use async_trait::async_trait;
use domain::{Contact, Vehicle};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the responder directory
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    /// Fetch a vehicle record
    async fn get_vehicle(&self, vehicle_id: &str) -> Result<Vehicle, ApplicationError>;

    /// Fetch a single contact
    async fn get_contact(&self, contact_id: &str) -> Result<Contact, ApplicationError>;

    /// List contacts flagged as available
    async fn list_available_contacts(&self) -> Result<Vec<Contact>, ApplicationError>;

    /// List contacts covering the zone the location falls in
    async fn find_contacts_in_zone(&self, location: &str)
    -> Result<Vec<Contact>, ApplicationError>;
}
