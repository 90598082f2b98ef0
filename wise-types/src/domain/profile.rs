//! Profile domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ProfileId;
use crate::error::DomainError;

/// The kind of Wise profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    Personal,
    Business,
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileType::Personal => write!(f, "personal"),
            ProfileType::Business => write!(f, "business"),
        }
    }
}

impl std::str::FromStr for ProfileType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "personal" => Ok(ProfileType::Personal),
            "business" => Ok(ProfileType::Business),
            _ => Err(DomainError::UnknownProfileType(s.to_string())),
        }
    }
}

/// A profile owning balances and recipients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub profile_type: ProfileType,
    /// Display name of the person or business, when the API provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_type_parse() {
        assert_eq!("personal".parse::<ProfileType>().unwrap(), ProfileType::Personal);
        assert_eq!("BUSINESS".parse::<ProfileType>().unwrap(), ProfileType::Business);
        assert!(matches!(
            "corporate".parse::<ProfileType>(),
            Err(DomainError::UnknownProfileType(t)) if t == "corporate"
        ));
    }

    #[test]
    fn test_profile_type_display_round_trip() {
        for t in [ProfileType::Personal, ProfileType::Business] {
            assert_eq!(t.to_string().parse::<ProfileType>().unwrap(), t);
        }
    }
}
