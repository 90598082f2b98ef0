//! Payments API port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! The Wise HTTP client implements it; tests use in-memory fakes.

use crate::domain::{
    Currency, FundingMethod, FundingOutcome, Profile, ProfileId, Quote, Recipient, Transfer,
    TransferId,
};
use crate::dto::{QuoteRequest, TransferRequest};
use crate::error::ApiError;

/// Remote operations the money-movement tools depend on.
///
/// Every call is a network round trip and may have real side effects;
/// implementations must not retry on their own.
#[async_trait::async_trait]
pub trait PaymentsApi: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Profiles & Recipients
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists all profiles the API token can act for.
    async fn list_profiles(&self) -> Result<Vec<Profile>, ApiError>;

    /// Gets a single profile.
    async fn get_profile(&self, profile_id: &ProfileId) -> Result<Profile, ApiError>;

    /// Lists the recipients of a profile, optionally only those in `currency`.
    async fn list_recipients(
        &self,
        profile_id: &ProfileId,
        currency: Option<&Currency>,
    ) -> Result<Vec<Recipient>, ApiError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Money Movement
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a quote. May reserve a rate lock with an expiry.
    async fn create_quote(&self, req: QuoteRequest) -> Result<Quote, ApiError>;

    /// Creates a transfer from a quote. Idempotent per `idempotency_token`.
    async fn create_transfer(&self, req: TransferRequest) -> Result<Transfer, ApiError>;

    /// Funds a created transfer. Moves money unless a step-up is required.
    async fn fund_transfer(
        &self,
        profile_id: &ProfileId,
        transfer_id: &TransferId,
        method: FundingMethod,
    ) -> Result<FundingOutcome, ApiError>;
}
