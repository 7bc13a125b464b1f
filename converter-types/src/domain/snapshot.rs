//! A fully populated rate table for one base currency.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::CurrencyCode;
use crate::error::DomainError;

/// One successful fetch: "1 unit of `base` = `rates[c]` units of `c`".
///
/// A snapshot is only ever built whole. It is replaced, never patched, by the
/// next successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSnapshot {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, f64>,
    fetched_at: DateTime<Utc>,
    provider_updated_at: Option<DateTime<Utc>>,
}

impl RateSnapshot {
    /// Builds a snapshot, rejecting empty tables and non-positive or
    /// non-finite rates.
    pub fn new(
        base: CurrencyCode,
        rates: BTreeMap<CurrencyCode, f64>,
        fetched_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if rates.is_empty() {
            return Err(DomainError::EmptyRates);
        }
        if let Some((currency, &rate)) = rates.iter().find(|(_, r)| !(r.is_finite() && **r > 0.0))
        {
            return Err(DomainError::InvalidRate {
                currency: currency.clone(),
                rate,
            });
        }
        Ok(Self {
            base,
            rates,
            fetched_at,
            provider_updated_at: None,
        })
    }

    /// Records when the provider says it last refreshed this table.
    pub fn with_provider_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.provider_updated_at = Some(at);
        self
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    /// Rate from the base currency into `to`, if quoted.
    pub fn rate(&self, to: &CurrencyCode) -> Option<f64> {
        self.rates.get(to).copied()
    }

    pub fn rates(&self) -> &BTreeMap<CurrencyCode, f64> {
        &self.rates
    }

    /// Quoted currencies, sorted.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        self.rates.keys().cloned().collect()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn provider_updated_at(&self) -> Option<DateTime<Utc>> {
        self.provider_updated_at
    }

    /// Provider update time, or the local fetch time when the provider gave none.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.provider_updated_at.unwrap_or(self.fetched_at)
    }
}
