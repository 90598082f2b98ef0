//! Recipient domain model.

use serde::{Deserialize, Serialize};

use super::ids::{ProfileId, RecipientId};
use super::quote::Currency;

/// A recipient account money can be sent to.
///
/// A snapshot fetched per request; never cached locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: RecipientId,
    /// Profile that owns this recipient
    pub profile_id: ProfileId,
    pub full_name: String,
    pub currency: Currency,
    pub country: String,
    /// Human-readable account summary, e.g. a masked IBAN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_summary: Option<String>,
}
