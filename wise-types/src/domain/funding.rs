//! Funding method, funding outcome, and the terminal transfer result.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransferId;
use crate::error::DomainError;

/// Error code reported when a failed funding response carries none.
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

/// Remote payment status that means the money moved.
const COMPLETED_STATUS: &str = "COMPLETED";

/// Where the money for a transfer comes from.
///
/// Only paying from the account balance is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundingMethod {
    Balance,
}

impl FundingMethod {
    /// Wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            FundingMethod::Balance => "BALANCE",
        }
    }
}

impl fmt::Display for FundingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FundingMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BALANCE" => Ok(FundingMethod::Balance),
            other => Err(DomainError::UnsupportedFundingMethod(other.to_string())),
        }
    }
}

/// Result of asking Wise to fund a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FundingOutcome {
    /// Money has moved.
    Completed,
    /// Strong customer authentication is needed before funding can proceed.
    StepUpRequired { one_time_token: String },
    /// Funding was rejected.
    Failed { error_code: String },
}

impl FundingOutcome {
    /// Classifies the pieces of a funding response.
    ///
    /// A step-up token wins over everything else, then a `COMPLETED`
    /// status; anything else is a failure.
    pub fn classify(
        step_up_token: Option<String>,
        status: Option<&str>,
        error_code: Option<String>,
    ) -> Self {
        if let Some(one_time_token) = step_up_token.filter(|t| !t.is_empty()) {
            return FundingOutcome::StepUpRequired { one_time_token };
        }
        if status.is_some_and(|s| s.eq_ignore_ascii_case(COMPLETED_STATUS)) {
            return FundingOutcome::Completed;
        }
        FundingOutcome::Failed {
            error_code: error_code
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR_CODE.to_string()),
        }
    }
}

/// Terminal result of a `send_money` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransferResult {
    Completed {
        transfer_id: TransferId,
    },
    /// Money has NOT moved; the payer must resolve the challenge out of band.
    StepUpRequired {
        transfer_id: TransferId,
        one_time_token: String,
    },
    Failed {
        transfer_id: TransferId,
        error_code: String,
    },
}

impl TransferResult {
    /// Attaches the funded transfer to a funding outcome.
    pub fn from_funding(transfer_id: TransferId, outcome: FundingOutcome) -> Self {
        match outcome {
            FundingOutcome::Completed => TransferResult::Completed { transfer_id },
            FundingOutcome::StepUpRequired { one_time_token } => TransferResult::StepUpRequired {
                transfer_id,
                one_time_token,
            },
            FundingOutcome::Failed { error_code } => TransferResult::Failed {
                transfer_id,
                error_code,
            },
        }
    }

    /// The transfer this result is about.
    pub fn transfer_id(&self) -> &TransferId {
        match self {
            TransferResult::Completed { transfer_id }
            | TransferResult::StepUpRequired { transfer_id, .. }
            | TransferResult::Failed { transfer_id, .. } => transfer_id,
        }
    }

    /// Returns true only if the money moved.
    pub fn is_completed(&self) -> bool {
        matches!(self, TransferResult::Completed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funding_method_parse() {
        assert_eq!("BALANCE".parse::<FundingMethod>().unwrap(), FundingMethod::Balance);
        assert!(matches!(
            "CARD".parse::<FundingMethod>(),
            Err(DomainError::UnsupportedFundingMethod(m)) if m == "CARD"
        ));
    }

    #[test]
    fn test_step_up_takes_priority() {
        let outcome = FundingOutcome::classify(
            Some("ott-123".to_string()),
            Some("COMPLETED"),
            Some("SOMETHING".to_string()),
        );
        assert_eq!(
            outcome,
            FundingOutcome::StepUpRequired {
                one_time_token: "ott-123".to_string()
            }
        );
    }

    #[test]
    fn test_completed_status() {
        assert_eq!(
            FundingOutcome::classify(None, Some("COMPLETED"), None),
            FundingOutcome::Completed
        );
    }

    #[test]
    fn test_failed_with_and_without_code() {
        assert_eq!(
            FundingOutcome::classify(None, Some("REJECTED"), Some("balance.insufficient".into())),
            FundingOutcome::Failed {
                error_code: "balance.insufficient".to_string()
            }
        );
        assert_eq!(
            FundingOutcome::classify(None, None, None),
            FundingOutcome::Failed {
                error_code: UNKNOWN_ERROR_CODE.to_string()
            }
        );
    }

    #[test]
    fn test_empty_token_is_ignored() {
        assert_eq!(
            FundingOutcome::classify(Some(String::new()), Some("COMPLETED"), None),
            FundingOutcome::Completed
        );
    }

    #[test]
    fn test_transfer_result_serialization() {
        let result = TransferResult::from_funding(
            TransferId::new("t1"),
            FundingOutcome::StepUpRequired {
                one_time_token: "ott".to_string(),
            },
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "step_up_required");
        assert_eq!(json["transfer_id"], "t1");
        assert_eq!(json["one_time_token"], "ott");
        assert!(!result.is_completed());
        assert_eq!(result.transfer_id().as_str(), "t1");
    }
}
