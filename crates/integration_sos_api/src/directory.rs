//! Directory client
//!
//! Read-only access to vehicles and responder contacts.

use async_trait::async_trait;
use domain::{Contact, Vehicle};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::SosApiConfig;
use crate::error::SosApiError;

/// Directory client trait
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// `GET /vehicles/{id}`
    async fn get_vehicle(&self, vehicle_id: &str) -> Result<Vehicle, SosApiError>;

    /// `GET /contacts/{id}`
    async fn get_contact(&self, contact_id: &str) -> Result<Contact, SosApiError>;

    /// `GET /contacts?isAvailable=true`
    async fn list_available_contacts(&self) -> Result<Vec<Contact>, SosApiError>;

    /// `GET /contacts/zone?location=...`
    async fn find_contacts_in_zone(&self, location: &str) -> Result<Vec<Contact>, SosApiError>;
}

/// HTTP implementation of [`DirectoryClient`]
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    client: Client,
    config: SosApiConfig,
}

impl HttpDirectoryClient {
    /// Create a new directory client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: SosApiConfig) -> Result<Self, SosApiError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SosApiError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Issue an authenticated GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        resource: &str,
    ) -> Result<T, SosApiError> {
        let url = self.config.endpoint(path);
        debug!(url = %url, "Querying directory");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| SosApiError::from_transport(&e, self.config.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SosApiError::from_status(status, resource));
        }

        response
            .json()
            .await
            .map_err(|e| SosApiError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    #[instrument(skip(self))]
    async fn get_vehicle(&self, vehicle_id: &str) -> Result<Vehicle, SosApiError> {
        self.get_json(
            &format!("/vehicles/{vehicle_id}"),
            &[],
            &format!("vehicle {vehicle_id}"),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_contact(&self, contact_id: &str) -> Result<Contact, SosApiError> {
        self.get_json(
            &format!("/contacts/{contact_id}"),
            &[],
            &format!("contact {contact_id}"),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_available_contacts(&self) -> Result<Vec<Contact>, SosApiError> {
        self.get_json("/contacts", &[("isAvailable", "true")], "available contacts")
            .await
    }

    #[instrument(skip(self))]
    async fn find_contacts_in_zone(&self, location: &str) -> Result<Vec<Contact>, SosApiError> {
        self.get_json(
            "/contacts/zone",
            &[("location", location)],
            &format!("zone {location}"),
        )
        .await
    }
}
