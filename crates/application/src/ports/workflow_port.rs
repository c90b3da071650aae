//! Workflow engine port
//!
//! Access to the workflow automation engine that runs the SOS workflows:
//! the emergency webhook and workflow/execution management.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::EmergencyData;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A workflow known to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    /// Engine identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether triggers are live
    pub active: bool,
    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time
    pub updated_at: Option<DateTime<Utc>>,
}

/// State of a workflow execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// Completed without error
    Success,
    /// Failed
    Error,
    /// Still running
    Running,
    /// Paused until a wait node resumes
    Waiting,
    /// Reported by the engine but not recognised
    Unknown,
}

/// One run of a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    /// Engine identifier
    pub id: String,
    /// Workflow that ran
    pub workflow_id: String,
    /// Whether the run has ended
    pub finished: bool,
    /// Trigger mode (webhook, manual, ...)
    pub mode: String,
    /// Current state
    pub status: ExecutionStatus,
    /// Start time
    pub started_at: Option<DateTime<Utc>>,
    /// End time
    pub stopped_at: Option<DateTime<Utc>>,
}

/// Port for the workflow engine
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WorkflowPort: Send + Sync {
    /// Post an emergency to the SOS webhook
    async fn trigger_emergency(&self, emergency: &EmergencyData) -> Result<(), ApplicationError>;

    /// List all workflows
    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>, ApplicationError>;

    /// List the most recent executions of a workflow
    async fn list_executions(
        &self,
        workflow_id: &str,
        limit: u32,
    ) -> Result<Vec<ExecutionSummary>, ApplicationError>;

    /// Activate or deactivate a workflow
    async fn set_workflow_active(
        &self,
        workflow_id: &str,
        active: bool,
    ) -> Result<WorkflowSummary, ApplicationError>;

    /// Run a workflow with an input payload
    async fn execute_workflow(
        &self,
        workflow_id: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, ApplicationError>;
}
