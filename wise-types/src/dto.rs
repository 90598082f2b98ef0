//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Currency, IdempotencyToken, ProfileId, QuoteId, Recipient, RecipientId};

/// Payment reference used when the caller gives none.
pub const DEFAULT_REFERENCE: &str = "money";

// ─────────────────────────────────────────────────────────────────────────────
// Port DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to price a transfer to a recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub profile_id: ProfileId,
    pub source_currency: Currency,
    pub target_currency: Currency,
    pub source_amount: f64,
    pub recipient_id: RecipientId,
}

/// Request to create a transfer from a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub recipient_id: RecipientId,
    pub quote_id: QuoteId,
    pub reference: String,
    pub idempotency_token: IdempotencyToken,
    /// Where the money comes from (e.g. "salary"); omitted when not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_of_funds: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Service DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to send money from a profile to a recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMoneyRequest {
    pub profile_id: ProfileId,
    pub source_currency: Currency,
    pub target_currency: Currency,
    /// Amount in major units of the source currency, e.g. `100.0`
    pub source_amount: f64,
    pub recipient_id: RecipientId,
    /// Defaults to "money"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_of_funds: Option<String>,
    /// Defaults to "BALANCE", the only supported method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_method: Option<String>,
}

/// A recipient found by fuzzy name matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientMatch {
    pub recipient: Recipient,
    /// Name similarity in `[0, 1]`
    pub score: f64,
}
