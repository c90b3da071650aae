//! n8n workflow adapter - Implements WorkflowPort using integration_n8n

use application::{
    ApplicationError, ExecutionStatus, ExecutionSummary, WorkflowPort, WorkflowSummary,
};
use async_trait::async_trait;
use domain::EmergencyData;
use integration_n8n::{Execution, HttpN8nClient, N8nClient, N8nConfig, N8nError, Workflow};
use tracing::{debug, info, instrument};

/// Adapter for the n8n workflow engine
#[derive(Debug)]
pub struct N8nWorkflowAdapter {
    client: HttpN8nClient,
}

impl N8nWorkflowAdapter {
    /// Create an adapter for the given n8n instance
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: N8nConfig) -> Result<Self, ApplicationError> {
        let client = HttpN8nClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Whether emergencies can be posted to a webhook
    #[must_use]
    pub const fn has_webhook(&self) -> bool {
        self.client.has_webhook()
    }

    /// Map integration n8n error to application error
    fn map_error(err: N8nError) -> ApplicationError {
        match err {
            N8nError::Api { status: 404, message } => ApplicationError::NotFound(message),
            N8nError::Api {
                status: 401 | 403,
                message,
            } => ApplicationError::Configuration(format!("n8n rejected the API key: {message}")),
            N8nError::Api { status: 429, .. } => ApplicationError::RateLimited,
            N8nError::Api { message, .. } => ApplicationError::ExternalService(message),
            err @ (N8nError::ConnectionFailed(_)
            | N8nError::RequestFailed(_)
            | N8nError::Timeout { .. }) => {
                ApplicationError::ExternalService(format!("n8n: {err}"))
            },
            N8nError::ParseError(e) => ApplicationError::Internal(e),
            N8nError::Configuration(e) => ApplicationError::Configuration(e),
        }
    }

    fn map_status(status: Option<&str>) -> ExecutionStatus {
        match status {
            Some("success") => ExecutionStatus::Success,
            Some("error" | "crashed" | "failed") => ExecutionStatus::Error,
            Some("running" | "new") => ExecutionStatus::Running,
            Some("waiting") => ExecutionStatus::Waiting,
            _ => ExecutionStatus::Unknown,
        }
    }

    fn map_workflow(workflow: Workflow) -> WorkflowSummary {
        WorkflowSummary {
            id: workflow.id,
            name: workflow.name,
            active: workflow.active,
            created_at: workflow.created_at,
            updated_at: workflow.updated_at,
        }
    }

    fn map_execution(execution: Execution) -> ExecutionSummary {
        ExecutionSummary {
            status: Self::map_status(execution.status.as_deref()),
            id: execution.id,
            workflow_id: execution.workflow_id,
            finished: execution.finished,
            mode: execution.mode,
            started_at: execution.started_at,
            stopped_at: execution.stopped_at,
        }
    }
}

#[async_trait]
impl WorkflowPort for N8nWorkflowAdapter {
    #[instrument(skip(self, emergency), fields(emergency_type = %emergency.emergency_type))]
    async fn trigger_emergency(&self, emergency: &EmergencyData) -> Result<(), ApplicationError> {
        let payload = serde_json::to_value(emergency)
            .map_err(|e| ApplicationError::Internal(format!("Failed to encode emergency: {e}")))?;

        self.client
            .trigger_webhook(&payload)
            .await
            .map_err(Self::map_error)?;
        info!("SOS workflow triggered");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>, ApplicationError> {
        let workflows = self.client.list_workflows().await.map_err(Self::map_error)?;
        debug!(count = workflows.len(), "Retrieved workflows");
        Ok(workflows.into_iter().map(Self::map_workflow).collect())
    }

    #[instrument(skip(self))]
    async fn list_executions(
        &self,
        workflow_id: &str,
        limit: u32,
    ) -> Result<Vec<ExecutionSummary>, ApplicationError> {
        let executions = self
            .client
            .list_executions(workflow_id, limit)
            .await
            .map_err(Self::map_error)?;
        debug!(count = executions.len(), "Retrieved executions");
        Ok(executions.into_iter().map(Self::map_execution).collect())
    }

    #[instrument(skip(self))]
    async fn set_workflow_active(
        &self,
        workflow_id: &str,
        active: bool,
    ) -> Result<WorkflowSummary, ApplicationError> {
        let workflow = self
            .client
            .set_workflow_active(workflow_id, active)
            .await
            .map_err(Self::map_error)?;
        info!(active = workflow.active, "Workflow activation updated");
        Ok(Self::map_workflow(workflow))
    }

    #[instrument(skip(self, payload))]
    async fn execute_workflow(
        &self,
        workflow_id: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, ApplicationError> {
        self.client
            .execute_workflow(workflow_id, &payload)
            .await
            .map_err(Self::map_error)
    }
}
