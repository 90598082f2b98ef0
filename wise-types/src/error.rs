//! Error types for the money-movement tools.

use name_match::MatchError;

use crate::domain::TransferId;

/// Domain-level errors (invalid values built from caller input).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Unsupported funding method: {0} (only BALANCE is supported)")]
    UnsupportedFundingMethod(String),

    #[error("Unknown profile type: {0} (expected personal or business)")]
    UnknownProfileType(String),
}

/// Failures of the remote payments API.
///
/// Propagated as-is; nothing in the core decides whether one is retryable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Wise API error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Application-level errors reported to tool callers.
///
/// Each orchestration step has its own variant so a failure can always be
/// attributed to the step that produced it.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No profiles found. Please create a profile in Wise first.")]
    NoProfiles,

    #[error("No profile found with type '{requested}'. Available types: {available}")]
    ProfileNotFound { requested: String, available: String },

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Quote creation failed: {0}")]
    QuoteFailed(#[source] ApiError),

    #[error("Transfer creation failed: {0}")]
    TransferCreationFailed(#[source] ApiError),

    #[error("Funding transfer {transfer_id} failed: {source}")]
    FundingRequestFailed {
        transfer_id: TransferId,
        #[source]
        source: ApiError,
    },

    #[error("Unsupported funding method: {0} (only BALANCE is supported)")]
    UnsupportedFundingMethod(String),

    #[error(transparent)]
    Remote(#[from] ApiError),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnsupportedFundingMethod(method) => {
                AppError::UnsupportedFundingMethod(method)
            }
            e @ DomainError::UnknownProfileType(_) => AppError::InvalidRequest(e.to_string()),
        }
    }
}
