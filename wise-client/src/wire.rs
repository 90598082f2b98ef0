//! Wise wire formats.
//!
//! Only the fields the tools consume are modeled. Everything is converted to
//! `wise_types` domain records right here so nothing past the client sees
//! raw JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wise_types::{
    ApiError, Currency, FundingOutcome, Profile, ProfileId, ProfileType, Quote, QuoteId,
    QuoteRequest, Recipient, RecipientId, Transfer, TransferId, TransferRequest,
};

// ─────────────────────────────────────────────────────────────────────────────
// Profiles
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileDto {
    id: ProfileId,
    #[serde(rename = "type")]
    profile_type: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    details: Option<ProfileDetailsDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileDetailsDto {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    /// Business profiles carry a company name instead
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<ProfileDto> for Profile {
    type Error = ApiError;

    fn try_from(dto: ProfileDto) -> Result<Self, Self::Error> {
        let profile_type: ProfileType = dto
            .profile_type
            .parse()
            .map_err(|e: wise_types::DomainError| ApiError::Decode(e.to_string()))?;

        let full_name = dto.full_name.or_else(|| {
            let details = dto.details?;
            details.name.or(match (details.first_name, details.last_name) {
                (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
                (first, last) => first.or(last),
            })
        });

        Ok(Profile {
            id: dto.id,
            profile_type,
            full_name,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Recipients
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /v2/accounts` answers with a page; older endpoints with a bare list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RecipientListDto {
    Page { content: Vec<RecipientDto> },
    List(Vec<RecipientDto>),
}

impl RecipientListDto {
    pub(crate) fn into_recipients(self) -> Vec<Recipient> {
        let items = match self {
            RecipientListDto::Page { content } => content,
            RecipientListDto::List(items) => items,
        };
        items.into_iter().map(Recipient::from).collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecipientDto {
    id: RecipientId,
    #[serde(alias = "profile")]
    profile_id: ProfileId,
    #[serde(default)]
    name: Option<RecipientNameDto>,
    #[serde(default)]
    account_holder_name: Option<String>,
    currency: Currency,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    account_summary: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipientNameDto {
    #[serde(default)]
    full_name: Option<String>,
}

impl From<RecipientDto> for Recipient {
    fn from(dto: RecipientDto) -> Self {
        let full_name = dto
            .name
            .and_then(|n| n.full_name)
            .or(dto.account_holder_name)
            .unwrap_or_default();

        Recipient {
            id: dto.id,
            profile_id: dto.profile_id,
            full_name,
            currency: dto.currency,
            country: dto.country.unwrap_or_default(),
            account_summary: dto.account_summary,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Quotes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteBody<'a> {
    source_currency: &'a Currency,
    target_currency: &'a Currency,
    source_amount: f64,
    target_account: &'a RecipientId,
}

impl<'a> From<&'a QuoteRequest> for QuoteBody<'a> {
    fn from(req: &'a QuoteRequest) -> Self {
        Self {
            source_currency: &req.source_currency,
            target_currency: &req.target_currency,
            source_amount: req.source_amount,
            target_account: &req.recipient_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteDto {
    id: QuoteId,
    #[serde(default)]
    source_currency: Option<Currency>,
    #[serde(default)]
    target_currency: Option<Currency>,
    #[serde(default)]
    source_amount: Option<f64>,
    #[serde(default)]
    target_amount: Option<f64>,
    #[serde(default)]
    rate: Option<f64>,
    #[serde(default)]
    expiration_time: Option<DateTime<Utc>>,
}

impl QuoteDto {
    /// Builds the domain quote, falling back to the request for omitted fields.
    pub(crate) fn into_quote(self, req: &QuoteRequest) -> Quote {
        Quote {
            id: self.id,
            source_currency: self
                .source_currency
                .unwrap_or_else(|| req.source_currency.clone()),
            target_currency: self
                .target_currency
                .unwrap_or_else(|| req.target_currency.clone()),
            source_amount: self.source_amount.unwrap_or(req.source_amount),
            target_amount: self.target_amount,
            rate: self.rate,
            target_account: Some(req.recipient_id.clone()),
            expiration_time: self.expiration_time,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transfers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransferBody<'a> {
    target_account: &'a RecipientId,
    quote_uuid: &'a QuoteId,
    customer_transaction_id: String,
    details: TransferDetailsBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferDetailsBody<'a> {
    reference: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_of_funds: Option<&'a str>,
}

impl<'a> From<&'a TransferRequest> for TransferBody<'a> {
    fn from(req: &'a TransferRequest) -> Self {
        Self {
            target_account: &req.recipient_id,
            quote_uuid: &req.quote_id,
            customer_transaction_id: req.idempotency_token.to_string(),
            details: TransferDetailsBody {
                reference: &req.reference,
                source_of_funds: req.source_of_funds.as_deref(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransferDto {
    id: TransferId,
    #[serde(default)]
    status: Option<String>,
}

impl TransferDto {
    pub(crate) fn into_transfer(self, req: TransferRequest) -> Transfer {
        Transfer {
            id: self.id,
            quote_id: req.quote_id,
            recipient_id: req.recipient_id,
            idempotency_token: req.idempotency_token,
            reference: req.reference,
            status: self.status,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Funding
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct FundBody {
    #[serde(rename = "type")]
    pub(crate) method: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FundResponseDto {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

impl From<FundResponseDto> for FundingOutcome {
    fn from(dto: FundResponseDto) -> Self {
        FundingOutcome::classify(None, dto.status.as_deref(), dto.error_code)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Option<Vec<ErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    message: Option<String>,
}

/// Extracts a readable message from an error response body.
///
/// Uses the first entry of the `errors` array; falls back to
/// `"HTTP <status>"` when the body cannot be read that way.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    const UNKNOWN: &str = "Unknown error";

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { errors: None }) => UNKNOWN.to_string(),
        Ok(ErrorBody {
            errors: Some(entries),
        }) => match entries.into_iter().next() {
            Some(entry) => entry.message.unwrap_or_else(|| UNKNOWN.to_string()),
            None => format!("HTTP {}", status),
        },
        Err(_) => format!("HTTP {}", status),
    }
}
