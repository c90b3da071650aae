//! Application services - Use case implementations

mod alert_service;
mod contact_service;
mod emergency_service;

pub use alert_service::{AlertConfig, AlertService, DEFAULT_EMAIL_SUBJECT};
pub use contact_service::{ContactService, MAX_SELECTED_CONTACTS, SelectionPolicy};
pub use emergency_service::{ContactDispatch, EmergencyReport, EmergencyService};
