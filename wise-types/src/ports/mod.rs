//! Port traits (interfaces for adapters).
//!
//! The application layer depends on these traits, not on the HTTP client.

mod payments;

pub use payments::PaymentsApi;
