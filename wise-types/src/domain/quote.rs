//! Currency code and quote domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{QuoteId, RecipientId};

/// An ISO 4217 currency code such as `USD` or `EUR`.
///
/// Codes are normalized to upper case. Whether a code (or a currency pair)
/// is actually supported is decided by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Creates a currency code, trimming and upper-casing the input.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// A locked exchange-rate proposal for one transfer attempt.
///
/// Quotes expire; one is created per `send_money` call and consumed
/// immediately by transfer creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub source_currency: Currency,
    pub target_currency: Currency,
    pub source_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    /// Recipient the quote was priced for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_account: Option<RecipientId>,
    /// When the rate lock lapses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<Utc>>,
}

impl Quote {
    /// Returns true if this quote covers the given pair and amount.
    pub fn covers(&self, source: &Currency, target: &Currency, source_amount: f64) -> bool {
        self.source_currency == *source
            && self.target_currency == *target
            && (self.source_amount - source_amount).abs() < 1e-9
    }
}
