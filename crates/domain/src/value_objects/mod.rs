//! Value Objects - Immutable, identity-less domain primitives

mod alert_priority;
mod channel;
mod emergency_type;

pub use alert_priority::AlertPriority;
pub use channel::Channel;
pub use emergency_type::EmergencyType;
