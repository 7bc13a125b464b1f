//! Fetch lifecycle for the currently selected base currency.

use std::fmt;

use serde::Serialize;

use super::RateSnapshot;
use crate::error::{FetchError, FetchErrorKind};

/// Message shown to the user for every fetch failure, whatever its kind.
pub const GENERIC_FETCH_FAILURE: &str = "Could not fetch exchange rates.";

/// Exactly one of these is active for the tracked base currency.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded(RateSnapshot),
    Failed(ErrorDetail),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    /// True once a fetch has resolved one way or the other.
    pub fn is_settled(&self) -> bool {
        matches!(self, FetchState::Loaded(_) | FetchState::Failed(_))
    }

    pub fn snapshot(&self) -> Option<&RateSnapshot> {
        match self {
            FetchState::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorDetail> {
        match self {
            FetchState::Failed(detail) => Some(detail),
            _ => None,
        }
    }

    /// Short lowercase name of the variant.
    pub fn label(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading => "loading",
            FetchState::Loaded(_) => "loaded",
            FetchState::Failed(_) => "failed",
        }
    }

    pub fn status_indicator(&self) -> StatusIndicator {
        match self {
            FetchState::Idle => StatusIndicator::Idle,
            FetchState::Loading => StatusIndicator::Updating,
            FetchState::Loaded(_) => StatusIndicator::Live,
            FetchState::Failed(_) => StatusIndicator::Offline,
        }
    }
}

/// Connection status badge derived from [`FetchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusIndicator {
    Idle,
    Updating,
    Offline,
    Live,
}

impl fmt::Display for StatusIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// What a failed fetch leaves behind.
///
/// `message` is what users see; `kind` and `diagnostic` are for logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub kind: FetchErrorKind,
    pub message: String,
    pub diagnostic: String,
}

impl From<&FetchError> for ErrorDetail {
    fn from(err: &FetchError) -> Self {
        Self {
            kind: err.kind(),
            message: GENERIC_FETCH_FAILURE.to_string(),
            diagnostic: err.to_string(),
        }
    }
}
