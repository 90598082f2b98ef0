//! Domain models for the money-movement tools.

pub mod funding;
pub mod ids;
pub mod profile;
pub mod quote;
pub mod recipient;
pub mod transfer;

pub use funding::{FundingMethod, FundingOutcome, TransferResult, UNKNOWN_ERROR_CODE};
pub use ids::{ProfileId, QuoteId, RecipientId, TransferId};
pub use profile::{Profile, ProfileType};
pub use quote::{Currency, Quote};
pub use recipient::Recipient;
pub use transfer::{IdempotencyToken, Transfer};
