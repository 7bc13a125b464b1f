//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use converter_client::DEFAULT_BASE_URL;
use converter_types::{ConversionInput, CurrencyCode};

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub default_from: CurrencyCode,
    pub default_to: CurrencyCode,
    pub default_amount: String,
    pub json_logs: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("CONVERTER_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs: u64 = lookup("CONVERTER_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("CONVERTER_TIMEOUT_SECS must be a whole number: {}", e))?;

        let default_from = CurrencyCode::parse(
            &lookup("CONVERTER_DEFAULT_FROM").unwrap_or_else(|| "USD".to_string()),
        )?;
        let default_to = CurrencyCode::parse(
            &lookup("CONVERTER_DEFAULT_TO").unwrap_or_else(|| "EUR".to_string()),
        )?;
        let default_amount = lookup("CONVERTER_DEFAULT_AMOUNT").unwrap_or_else(|| "1".to_string());

        let json_logs = lookup("CONVERTER_LOG_FORMAT")
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            default_from,
            default_to,
            default_amount,
            json_logs,
        })
    }

    /// Starting selection for a session.
    pub fn initial_input(&self) -> anyhow::Result<ConversionInput> {
        Ok(ConversionInput::new(
            &self.default_amount,
            self.default_from.clone(),
            self.default_to.clone(),
        )?)
    }
}
