//! Wise Application Service
//!
//! Orchestrates remote operations through the payments API port.
//! Contains NO infrastructure logic - pure business orchestration.

use name_match::best_match_by;
use wise_types::{
    AppError, Currency, DEFAULT_REFERENCE, FundingMethod, IdempotencyToken, PaymentsApi, Profile,
    ProfileId, ProfileType, QuoteRequest, Recipient, RecipientMatch, SendMoneyRequest,
    TransferRequest, TransferResult,
};

/// Application service for money-movement operations.
///
/// Generic over `A: PaymentsApi` - the adapter is injected at compile time,
/// so tests run against an in-memory fake. Holds no mutable state; every
/// call is independent.
pub struct WiseService<A: PaymentsApi> {
    api: A,
}

impl<A: PaymentsApi> WiseService<A> {
    /// Creates a new service with the given API adapter.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Returns a reference to the underlying API adapter.
    pub fn api(&self) -> &A {
        &self.api
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Profiles
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists all profiles.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        self.api.list_profiles().await.map_err(Into::into)
    }

    /// Gets a profile by ID.
    pub async fn get_profile(&self, profile_id: &ProfileId) -> Result<Profile, AppError> {
        self.api.get_profile(profile_id).await.map_err(Into::into)
    }

    /// Returns the first profile of the given type.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_profile(&self, profile_type: ProfileType) -> Result<Profile, AppError> {
        let profiles = self.api.list_profiles().await?;
        if profiles.is_empty() {
            return Err(AppError::NoProfiles);
        }

        if let Some(profile) = profiles.iter().find(|p| p.profile_type == profile_type) {
            tracing::debug!(profile_id = %profile.id, "Resolved profile");
            return Ok(profile.clone());
        }

        let mut available: Vec<String> = Vec::new();
        for p in &profiles {
            let t = p.profile_type.to_string();
            if !available.contains(&t) {
                available.push(t);
            }
        }
        Err(AppError::ProfileNotFound {
            requested: profile_type.to_string(),
            available: available.join(", "),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Recipients
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists the recipients of the first profile of `profile_type`.
    #[tracing::instrument(skip(self))]
    pub async fn list_recipients(
        &self,
        profile_type: ProfileType,
        currency: Option<Currency>,
    ) -> Result<Vec<Recipient>, AppError> {
        let profile = self.resolve_profile(profile_type).await?;
        let recipients = self
            .api
            .list_recipients(&profile.id, currency.as_ref())
            .await?;
        tracing::debug!(count = recipients.len(), "Listed recipients");
        Ok(recipients)
    }

    /// Finds the recipient whose full name best matches `name`.
    #[tracing::instrument(skip(self))]
    pub async fn find_recipient(
        &self,
        profile_type: ProfileType,
        name: &str,
        currency: Option<Currency>,
    ) -> Result<RecipientMatch, AppError> {
        let recipients = self.list_recipients(profile_type, currency).await?;
        let found = best_match_by(&recipients, name, |r| r.full_name.as_str())?;
        tracing::info!(
            recipient_id = %found.item.id,
            score = found.score,
            "Matched recipient"
        );

        Ok(RecipientMatch {
            recipient: found.item.clone(),
            score: found.score,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transfers
    // ─────────────────────────────────────────────────────────────────────────────

    /// Sends money: quote, then transfer, then funding from the balance.
    ///
    /// Steps run strictly in order and nothing is retried or rolled back.
    /// Each failure names its step; a funding response is classified into
    /// completed, step-up required, or failed.
    #[tracing::instrument(
        skip(self, req),
        fields(
            profile_id = %req.profile_id,
            recipient_id = %req.recipient_id,
            amount = req.source_amount,
            source = %req.source_currency,
            target = %req.target_currency,
        )
    )]
    pub async fn send_money(&self, req: SendMoneyRequest) -> Result<TransferResult, AppError> {
        // Local checks first: nothing below may run if these fail.
        let method: FundingMethod = req
            .funding_method
            .as_deref()
            .unwrap_or(FundingMethod::Balance.as_str())
            .parse()?;

        if !req.source_amount.is_finite() || req.source_amount <= 0.0 {
            return Err(AppError::InvalidRequest("Amount must be positive".into()));
        }
        if req.profile_id.is_blank() {
            return Err(AppError::InvalidRequest("Profile ID cannot be empty".into()));
        }
        if req.recipient_id.is_blank() {
            return Err(AppError::InvalidRequest(
                "Recipient ID cannot be empty".into(),
            ));
        }

        let reference = req
            .reference
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REFERENCE.to_string());

        // 1. Quote
        let quote = self
            .api
            .create_quote(QuoteRequest {
                profile_id: req.profile_id.clone(),
                source_currency: req.source_currency.clone(),
                target_currency: req.target_currency.clone(),
                source_amount: req.source_amount,
                recipient_id: req.recipient_id.clone(),
            })
            .await
            .map_err(AppError::QuoteFailed)?;

        if !quote.covers(&req.source_currency, &req.target_currency, req.source_amount) {
            return Err(AppError::QuoteFailed(wise_types::ApiError::Decode(format!(
                "quote {} is for {} {} -> {}, requested {} {} -> {}",
                quote.id,
                quote.source_amount,
                quote.source_currency,
                quote.target_currency,
                req.source_amount,
                req.source_currency,
                req.target_currency
            ))));
        }
        tracing::info!(quote_id = %quote.id, "Quote created");

        // 2. Transfer
        let transfer = self
            .api
            .create_transfer(TransferRequest {
                recipient_id: req.recipient_id,
                quote_id: quote.id,
                reference,
                idempotency_token: IdempotencyToken::new(),
                source_of_funds: req.source_of_funds,
            })
            .await
            .map_err(AppError::TransferCreationFailed)?;
        tracing::info!(
            transfer_id = %transfer.id,
            idempotency_token = %transfer.idempotency_token,
            "Transfer created"
        );

        // 3. Funding
        let outcome = self
            .api
            .fund_transfer(&req.profile_id, &transfer.id, method)
            .await
            .map_err(|source| AppError::FundingRequestFailed {
                transfer_id: transfer.id.clone(),
                source,
            })?;

        let result = TransferResult::from_funding(transfer.id, outcome);
        match &result {
            TransferResult::Completed { transfer_id } => {
                tracing::info!(%transfer_id, "Transfer funded");
            }
            TransferResult::StepUpRequired { transfer_id, .. } => {
                tracing::warn!(%transfer_id, "Funding needs strong customer authentication");
            }
            TransferResult::Failed {
                transfer_id,
                error_code,
            } => {
                tracing::warn!(%transfer_id, %error_code, "Funding failed");
            }
        }
        Ok(result)
    }
}
