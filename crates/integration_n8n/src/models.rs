//! n8n API wire models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A workflow as returned by `GET /workflows`
///
/// Node graphs and connections are not decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Workflow identifier
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Whether the workflow's triggers are live
    #[serde(default)]
    pub active: bool,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A workflow execution as returned by `GET /executions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    /// Execution identifier
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Workflow that was executed
    #[serde(deserialize_with = "string_or_number")]
    pub workflow_id: String,
    /// Whether the execution has ended
    #[serde(default)]
    pub finished: bool,
    /// Trigger mode (`webhook`, `manual`, `trigger`, ...)
    #[serde(default)]
    pub mode: String,
    /// Raw status string; older n8n versions omit it
    #[serde(default)]
    pub status: Option<String>,
    /// Start time
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// End time
    #[serde(default)]
    pub stopped_at: Option<DateTime<Utc>>,
    /// Resume time for executions parked on a wait node
    #[serde(default)]
    pub wait_till: Option<DateTime<Utc>>,
}

/// `{ "data": [...] }` list envelope
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Error body returned by n8n on failure
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Activation toggle body for `PATCH /workflows/{id}`
#[derive(Debug, Serialize)]
pub(crate) struct ActivationRequest {
    pub active: bool,
}

/// n8n has returned numeric ids in some API versions
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_ignores_node_graph() {
        let json = r#"{
            "id": "wf1",
            "name": "SOS dispatch",
            "active": true,
            "nodes": [{"type": "n8n-nodes-base.webhook"}],
            "connections": {},
            "createdAt": "2024-03-01T08:00:00.000Z",
            "updatedAt": "2024-03-02T09:30:00.000Z"
        }"#;

        let workflow: Workflow = serde_json::from_str(json).unwrap();
        assert_eq!(workflow.id, "wf1");
        assert!(workflow.active);
        assert!(workflow.created_at.is_some());
    }

    #[test]
    fn execution_accepts_numeric_ids() {
        let json = r#"{
            "id": 1042,
            "workflowId": 7,
            "finished": false,
            "mode": "webhook",
            "startedAt": "2024-03-01T08:00:00.000Z",
            "stoppedAt": null
        }"#;

        let execution: Execution = serde_json::from_str(json).unwrap();
        assert_eq!(execution.id, "1042");
        assert_eq!(execution.workflow_id, "7");
        assert!(execution.status.is_none());
        assert!(execution.stopped_at.is_none());
    }

    #[test]
    fn envelope_defaults_to_empty() {
        let envelope: DataEnvelope<Workflow> = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn error_body_without_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"code": 404}"#).unwrap();
        assert!(body.message.is_none());
    }
}
