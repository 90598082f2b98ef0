//! Transfer domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::{QuoteId, RecipientId, TransferId};

/// Caller-generated token that makes transfer creation idempotent.
///
/// Sent to Wise as `customerTransactionId`. A fresh one is generated for
/// every `send_money` call and never reused automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyToken(Uuid);

impl IdempotencyToken {
    /// Creates a new random token.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for IdempotencyToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for IdempotencyToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for IdempotencyToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A created, not yet funded transfer.
///
/// Persisted by Wise once created; only its identifier matters after the
/// funding call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: TransferId,
    pub quote_id: QuoteId,
    pub recipient_id: RecipientId,
    pub idempotency_token: IdempotencyToken,
    pub reference: String,
    /// Remote status at creation time (e.g. `incoming_payment_waiting`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
