//! The user's conversion selections.

use exchange_rates::amount;
use serde::Serialize;

use super::RateSnapshot;
use crate::{AmountError, ConversionOutput, CurrencyCode};

/// Amount text plus the from/to selection.
///
/// `amount` only ever holds text the amount rules accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionInput {
    amount: String,
    from: CurrencyCode,
    to: CurrencyCode,
}

impl ConversionInput {
    /// Creates an input, accepting and normalizing the amount text.
    pub fn new(amount: &str, from: CurrencyCode, to: CurrencyCode) -> Result<Self, AmountError> {
        Ok(Self {
            amount: amount::accept(amount)?,
            from,
            to,
        })
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn from(&self) -> &CurrencyCode {
        &self.from
    }

    pub fn to(&self) -> &CurrencyCode {
        &self.to
    }

    /// Applies an edit to the amount. Rejected text leaves the amount as is.
    pub fn edit_amount(&mut self, raw: &str) -> Result<(), AmountError> {
        self.amount = amount::accept(raw)?;
        Ok(())
    }

    pub fn set_from(&mut self, from: CurrencyCode) {
        self.from = from;
    }

    pub fn set_to(&mut self, to: CurrencyCode) {
        self.to = to;
    }

    /// Exchanges from and to in one step.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    /// Converts against `snapshot`, if it is for `from` and quotes `to`.
    pub fn output(&self, snapshot: &RateSnapshot) -> Option<ConversionOutput> {
        if snapshot.base() != &self.from {
            return None;
        }
        let rate = snapshot.rate(&self.to)?;
        exchange_rates::convert_amount(&self.amount, rate)
    }
}
