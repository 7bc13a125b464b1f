//! # Converter Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has ZERO IO dependencies - only data structures,
//! state rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the hexagonal layout:
//! - `domain/` - Rate snapshots, fetch state, conversion input
//! - `ports/` - The rate provider trait that outbound adapters implement
//! - `dto/` - Read-only views handed to presentation adapters
//! - `error/` - Domain, fetch and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{ConversionInput, ErrorDetail, FetchState, RateSnapshot, StatusIndicator};
pub use dto::SessionView;
pub use error::{AppError, DomainError, FetchError, FetchErrorKind};
pub use exchange_rates::{AmountError, ConversionOutput, CurrencyCode, InvalidCurrencyCode};
pub use ports::RateProvider;
