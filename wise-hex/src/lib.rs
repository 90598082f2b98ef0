//! # Wise Hex
//!
//! Application service layer and MCP adapter for the Wise tools.
//!
//! ## Architecture
//!
//! - `service/` - Application service (profile resolution, recipient
//!   matching, quote/transfer/fund orchestration)
//! - `inbound/` - MCP adapter (JSON-RPC over stdio)
//!
//! The service is generic over `A: PaymentsApi`, allowing the HTTP client
//! or an in-memory fake to be injected.

pub mod inbound;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::WiseService;
