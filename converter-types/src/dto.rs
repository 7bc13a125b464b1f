//! Read-only views handed to presentation adapters.

use serde::Serialize;

use crate::{ConversionOutput, CurrencyCode, FetchState, StatusIndicator};

/// Everything a presentation layer needs for one render pass.
///
/// Built fresh on every query; holding one never keeps session state alive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: String,
    pub status: StatusIndicator,
    pub fetch_state: FetchState,
    /// Sorted codes from the loaded rate table; empty unless loaded.
    pub currencies: Vec<CurrencyCode>,
    /// Rate from `from` into `to`, when loaded and quoted.
    pub rate: Option<f64>,
    pub conversion: Option<ConversionOutput>,
}

