//! End-to-end emergency handling
//!
//! Raises an emergency: notifies the SOS workflow, selects responders and
//! alerts each of them, folding every outcome into one report.

use std::sync::Arc;

use domain::{
    AlertOptions, Channel, Contact, ContactSelectionCriteria, DispatchResult, EmergencyData,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::{AlertService, ContactService};
use crate::ports::WorkflowPort;

/// Dispatch outcome for one selected contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDispatch {
    /// Contact identifier
    pub contact_id: String,
    /// Contact display name
    pub contact_name: String,
    /// Per-channel outcome
    pub result: DispatchResult,
}

/// Outcome of raising an emergency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyReport {
    /// Responders selected, by ascending priority
    pub contacts: Vec<Contact>,
    /// Dispatch outcome per contact, in the same order
    pub dispatches: Vec<ContactDispatch>,
    /// Webhook outcome; `None` when no workflow engine is attached
    pub webhook_triggered: Option<bool>,
    /// At least one contact was reached
    pub success: bool,
}

impl EmergencyReport {
    /// Number of contacts reached on at least one channel
    #[must_use]
    pub fn reached(&self) -> usize {
        self.dispatches.iter().filter(|d| d.result.success).count()
    }
}

/// Service raising emergencies end to end
pub struct EmergencyService {
    contacts: ContactService,
    alerts: AlertService,
    workflow: Option<Arc<dyn WorkflowPort>>,
}

impl std::fmt::Debug for EmergencyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmergencyService")
            .field("contacts", &self.contacts)
            .field("alerts", &self.alerts)
            .field("has_workflow", &self.workflow.is_some())
            .finish()
    }
}

impl EmergencyService {
    /// Create the service from its collaborators
    #[must_use]
    pub fn new(contacts: ContactService, alerts: AlertService) -> Self {
        Self {
            contacts,
            alerts,
            workflow: None,
        }
    }

    /// Also post every emergency to the SOS workflow webhook
    #[must_use]
    pub fn with_workflow(mut self, workflow: Arc<dyn WorkflowPort>) -> Self {
        self.workflow = Some(workflow);
        self
    }

    /// Contact selection service
    #[must_use]
    pub const fn contacts(&self) -> &ContactService {
        &self.contacts
    }

    /// Alert dispatch service
    #[must_use]
    pub const fn alerts(&self) -> &AlertService {
        &self.alerts
    }

    /// Raise an emergency and alert the selected responders
    ///
    /// Never fails: a webhook failure is recorded in the report and direct
    /// dispatch still proceeds.
    #[instrument(skip(self, emergency, channels), fields(
        emergency_type = %emergency.emergency_type,
        location = %emergency.location,
    ))]
    pub async fn raise(&self, emergency: &EmergencyData, channels: &[Channel]) -> EmergencyReport {
        let webhook_triggered = match &self.workflow {
            Some(workflow) => match workflow.trigger_emergency(emergency).await {
                Ok(()) => Some(true),
                Err(e) => {
                    warn!(error = %e, "Failed to trigger SOS workflow, dispatching directly");
                    Some(false)
                },
            },
            None => None,
        };

        let criteria = ContactSelectionCriteria::from(emergency);
        let contacts = self.contacts.select_contacts_for_emergency(&criteria).await;
        if contacts.is_empty() {
            warn!("No contacts selected for emergency");
        }

        let options = AlertOptions::new(emergency.alert_message())
            .with_priority(emergency.priority)
            .with_channels(channels.iter().copied());

        let mut dispatches = Vec::with_capacity(contacts.len());
        for contact in &contacts {
            let result = self.alerts.alert_contact(contact, &options).await;
            dispatches.push(ContactDispatch {
                contact_id: contact.id.clone(),
                contact_name: contact.name.clone(),
                result,
            });
        }

        let report = EmergencyReport {
            success: dispatches.iter().any(|d| d.result.success),
            contacts,
            dispatches,
            webhook_triggered,
        };
        info!(
            selected = report.contacts.len(),
            reached = report.reached(),
            success = report.success,
            "Emergency raised"
        );
        report
    }
}
