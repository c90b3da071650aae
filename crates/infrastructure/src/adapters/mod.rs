//! Adapters implementing application ports on top of the integration crates

mod directory_adapter;
mod gateway_adapter;
mod n8n_workflow_adapter;

pub use directory_adapter::DirectoryAdapter;
pub use gateway_adapter::{GatewayAdapter, PUSH_PRIORITY};
pub use n8n_workflow_adapter::N8nWorkflowAdapter;

use application::ApplicationError;
use integration_sos_api::SosApiError;

/// Map an SOS API client error to an application error
pub(crate) fn map_sos_error(service: &str, err: SosApiError) -> ApplicationError {
    match err {
        SosApiError::NotFound(resource) => ApplicationError::NotFound(resource),
        SosApiError::RateLimitExceeded => ApplicationError::RateLimited,
        SosApiError::UnexpectedStatus { status } => ApplicationError::UnexpectedStatus {
            service: service.to_string(),
            status,
        },
        SosApiError::Unauthorized => {
            ApplicationError::Configuration(format!("{service} rejected the API key"))
        },
        SosApiError::Configuration(e) => ApplicationError::Configuration(e),
        SosApiError::ParseError(e) => {
            ApplicationError::Internal(format!("{service} returned an unreadable body: {e}"))
        },
        err @ (SosApiError::ConnectionFailed(_)
        | SosApiError::RequestFailed(_)
        | SosApiError::Timeout { .. }) => {
            ApplicationError::ExternalService(format!("{service}: {err}"))
        },
    }
}
