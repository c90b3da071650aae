//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod directory_port;
mod notification_gateway_port;
mod workflow_port;

pub use directory_port::DirectoryPort;
#[cfg(test)]
pub use directory_port::MockDirectoryPort;
pub use notification_gateway_port::NotificationGatewayPort;
#[cfg(test)]
pub use notification_gateway_port::MockNotificationGatewayPort;
#[cfg(test)]
pub use workflow_port::MockWorkflowPort;
pub use workflow_port::{ExecutionStatus, ExecutionSummary, WorkflowPort, WorkflowSummary};
