//! Exchange rate provider port.
//!
//! Implementations can be HTTP clients, in-memory fakes, etc.

use std::sync::Arc;

use crate::{CurrencyCode, FetchError, RateSnapshot};

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the latest full rate table for `base`.
    ///
    /// Performs one request and no retries. Must not touch any shared state;
    /// deciding what to do with the result is the caller's job.
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateSnapshot, FetchError>;
}

#[async_trait::async_trait]
impl<P: RateProvider + ?Sized> RateProvider for Arc<P> {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateSnapshot, FetchError> {
        (**self).fetch_rates(base).await
    }
}
