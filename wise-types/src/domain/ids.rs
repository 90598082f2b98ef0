//! Opaque identifiers for remote resources.
//!
//! Wise hands out numeric ids for profiles, recipients, and transfers and
//! UUIDs for quotes. All of them are kept as strings here; deserialization
//! accepts either a JSON string or a JSON number.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from its string form.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the identifier is empty or whitespace.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Ok(match RawId::deserialize(deserializer)? {
                    RawId::Text(s) => Self(s),
                    RawId::Number(n) => Self(n.to_string()),
                })
            }
        }
    };
}

define_id!(
    /// Identifier of a Wise profile (personal or business).
    ProfileId
);
define_id!(
    /// Identifier of a recipient account.
    RecipientId
);
define_id!(
    /// Identifier of a quote.
    QuoteId
);
define_id!(
    /// Identifier of a transfer.
    TransferId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_number_or_string() {
        let from_number: ProfileId = serde_json::from_str("12345").unwrap();
        let from_text: ProfileId = serde_json::from_str("\"12345\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number.as_str(), "12345");
    }

    #[test]
    fn test_serializes_as_string() {
        let id = TransferId::from(987u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"987\"");
    }

    #[test]
    fn test_blank_ids() {
        assert!(RecipientId::new("  ").is_blank());
        assert!(!RecipientId::new("r1").is_blank());
    }
}
