//! # Converter Client
//!
//! HTTP adapter for the public exchange rate provider. Implements the
//! [`RateProvider`] port with one `GET {base_url}/v6/latest/{BASE}` per call.

pub mod wire;

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tracing::{info, warn};

use converter_types::{CurrencyCode, FetchError, RateProvider, RateSnapshot};

pub use wire::parse_latest_rates;

/// Public provider used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://open.er-api.com";

const LATEST_RATES_PATH: &str = "v6/latest";

/// Error type for client construction.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Exchange rate provider client.
pub struct RateApiClient {
    base_url: String,
    http: Client,
}

impl RateApiClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Bounds each request by `timeout`. Without this the transport default
    /// applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ClientError> {
        self.http = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the latest-rates endpoint for `base`.
    pub fn latest_rates_url(&self, base: &CurrencyCode) -> String {
        format!("{}/{}/{}", self.base_url, LATEST_RATES_PATH, base)
    }
}

impl Default for RateApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl RateProvider for RateApiClient {
    #[tracing::instrument(skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateSnapshot, FetchError> {
        let url = self.latest_rates_url(base);
        let resp = self.http.get(&url).send().await.map_err(network_error)?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Rate provider returned HTTP {}", status);
            return Err(FetchError::NetworkFailure {
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        let body = resp.text().await.map_err(network_error)?;
        let snapshot = parse_latest_rates(base, &body, Utc::now()).inspect_err(|e| {
            warn!("Rejected rate provider response: {}", e);
        })?;

        info!("Fetched {} rates for {}", snapshot.rates().len(), base);
        Ok(snapshot)
    }
}

fn network_error(err: reqwest::Error) -> FetchError {
    warn!("Rate provider request failed: {}", err);
    FetchError::NetworkFailure {
        status: err.status().map(|s| s.as_u16()),
        message: err.to_string(),
    }
}
