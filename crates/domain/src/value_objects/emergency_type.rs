//! Emergency type value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Kind of emergency being reported
///
/// The wire name doubles as the specialty tag a qualified contact carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyType {
    /// Injury or illness
    Medical,
    /// Threat to people or cargo
    Security,
    /// Vehicle or equipment failure
    Technical,
}

impl EmergencyType {
    /// Specialty tag matched against `Contact::specialties`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Medical => "medical",
            Self::Security => "security",
            Self::Technical => "technical",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Medical => "Medical",
            Self::Security => "Security",
            Self::Technical => "Technical",
        }
    }

    /// Default alert priority for this kind of emergency
    #[must_use]
    pub const fn default_priority(&self) -> crate::AlertPriority {
        match self {
            Self::Medical | Self::Security => crate::AlertPriority::High,
            Self::Technical => crate::AlertPriority::Medium,
        }
    }
}

impl fmt::Display for EmergencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmergencyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "medical" => Ok(Self::Medical),
            "security" => Ok(Self::Security),
            "technical" => Ok(Self::Technical),
            _ => Err(DomainError::InvalidEmergencyType(s.to_string())),
        }
    }
}
