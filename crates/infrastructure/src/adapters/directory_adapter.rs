//! Directory adapter - Implements DirectoryPort using integration_sos_api

use application::{ApplicationError, DirectoryPort};
use async_trait::async_trait;
use domain::{Contact, Vehicle};
use integration_sos_api::{DirectoryClient, HttpDirectoryClient, SosApiConfig};
use tracing::{debug, instrument};

use super::map_sos_error;

const SERVICE: &str = "directory";

/// Adapter for the SOS responder directory
#[derive(Debug)]
pub struct DirectoryAdapter {
    client: HttpDirectoryClient,
}

impl DirectoryAdapter {
    /// Create an adapter for the given endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: SosApiConfig) -> Result<Self, ApplicationError> {
        let client = HttpDirectoryClient::new(config).map_err(|e| map_sos_error(SERVICE, e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DirectoryPort for DirectoryAdapter {
    #[instrument(skip(self))]
    async fn get_vehicle(&self, vehicle_id: &str) -> Result<Vehicle, ApplicationError> {
        let vehicle = self
            .client
            .get_vehicle(vehicle_id)
            .await
            .map_err(|e| map_sos_error(SERVICE, e))?;
        debug!(
            contacts = vehicle.emergency_contacts.len(),
            "Retrieved vehicle"
        );
        Ok(vehicle)
    }

    #[instrument(skip(self))]
    async fn get_contact(&self, contact_id: &str) -> Result<Contact, ApplicationError> {
        self.client
            .get_contact(contact_id)
            .await
            .map_err(|e| map_sos_error(SERVICE, e))
    }

    #[instrument(skip(self))]
    async fn list_available_contacts(&self) -> Result<Vec<Contact>, ApplicationError> {
        let contacts = self
            .client
            .list_available_contacts()
            .await
            .map_err(|e| map_sos_error(SERVICE, e))?;
        debug!(count = contacts.len(), "Retrieved available contacts");
        Ok(contacts)
    }

    #[instrument(skip(self))]
    async fn find_contacts_in_zone(
        &self,
        location: &str,
    ) -> Result<Vec<Contact>, ApplicationError> {
        let contacts = self
            .client
            .find_contacts_in_zone(location)
            .await
            .map_err(|e| map_sos_error(SERVICE, e))?;
        debug!(count = contacts.len(), "Retrieved zone contacts");
        Ok(contacts)
    }
}
