//! Domain entities

mod alert;
mod contact;
mod emergency;
mod selection;
mod vehicle;

pub use alert::{AlertOptions, DispatchResult};
pub use contact::{Contact, NotificationPreferences};
pub use emergency::EmergencyData;
pub use selection::ContactSelectionCriteria;
pub use vehicle::{Checkpoint, Driver, GeoPosition, Route, TransportDetails, Vehicle};
