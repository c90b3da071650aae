//! Domain layer for SOS dispatch
//!
//! Contains the responder directory model, emergency criteria, alert options
//! and dispatch outcomes. This layer performs no I/O and defines the
//! ubiquitous language shared by the other crates.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
