//! Error types for the converter.

use serde::Serialize;

use crate::{AmountError, CurrencyCode, InvalidCurrencyCode};

/// Domain-level errors (rule violations in the data itself).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    InvalidCurrency(#[from] InvalidCurrencyCode),

    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    #[error("Rate table is empty")]
    EmptyRates,

    #[error("Rate for {currency} must be positive and finite, got {rate}")]
    InvalidRate { currency: CurrencyCode, rate: f64 },
}

/// Which way a fetch failed, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchErrorKind {
    NetworkFailure,
    MalformedResponse,
}

/// Outbound rate fetch failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Transport failure or non-2xx status.
    #[error("Network error{}: {message}", status_suffix(status))]
    NetworkFailure { status: Option<u16>, message: String },

    /// The provider answered, but not with a usable rate table.
    #[error("Invalid API response: {0}")]
    MalformedResponse(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::NetworkFailure { .. } => FetchErrorKind::NetworkFailure,
            FetchError::MalformedResponse(_) => FetchErrorKind::MalformedResponse,
        }
    }

    /// HTTP status, when the failure came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::NetworkFailure { status, .. } => *status,
            FetchError::MalformedResponse(_) => None,
        }
    }
}

impl From<DomainError> for FetchError {
    fn from(err: DomainError) -> Self {
        FetchError::MalformedResponse(err.to_string())
    }
}

/// Application-level errors returned by session operations.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Retry is only available after a failed fetch (current state: {state})")]
    RetryUnavailable { state: &'static str },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<InvalidCurrencyCode> for AppError {
    fn from(err: InvalidCurrencyCode) -> Self {
        AppError::Domain(err.into())
    }
}

impl From<AmountError> for AppError {
    fn from(err: AmountError) -> Self {
        AppError::Domain(err.into())
    }
}
