//! # Wise Types
//!
//! Domain types and port traits for the Wise money-movement tools.
//! This crate has ZERO IO dependencies - only data structures,
//! classification rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Typed records (Profile, Recipient, Quote, Transfer, FundingOutcome)
//! - `ports/` - The `PaymentsApi` trait that the HTTP adapter implements
//! - `dto/` - Request and response shapes crossing the service boundary
//! - `error/` - Domain, remote API, and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Currency, FundingMethod, FundingOutcome, IdempotencyToken, Profile, ProfileId, ProfileType,
    Quote, QuoteId, Recipient, RecipientId, Transfer, TransferId, TransferResult,
    UNKNOWN_ERROR_CODE,
};
pub use dto::*;
pub use error::{ApiError, AppError, DomainError};
pub use ports::PaymentsApi;
