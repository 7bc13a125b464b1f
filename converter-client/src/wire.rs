//! Provider wire format and the schema check at the provider boundary.
//!
//! Expected success body:
//! ```json
//! {
//!   "result": "success",
//!   "base_code": "USD",
//!   "time_last_update_unix": 1700000000,
//!   "time_last_update_utc": "Tue, 14 Nov 2023 22:13:20 +0000",
//!   "rates": { "USD": 1, "EUR": 0.9 }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use converter_types::{CurrencyCode, FetchError, RateSnapshot};

/// Raw `latest/{base}` body. Every field is optional here; presence is
/// checked in [`parse_latest_rates`].
#[derive(Debug, Deserialize)]
struct LatestRatesBody {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    base_code: Option<String>,
    time_last_update_unix: Option<i64>,
    time_last_update_utc: Option<String>,
    rates: Option<HashMap<String, f64>>,
}

/// Validates a provider body and normalizes it into a [`RateSnapshot`].
pub fn parse_latest_rates(
    base: &CurrencyCode,
    body: &str,
    fetched_at: DateTime<Utc>,
) -> Result<RateSnapshot, FetchError> {
    let body: LatestRatesBody = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("unparseable body: {e}")))?;

    match body.result.as_deref() {
        Some("success") => {}
        Some("error") => {
            return Err(FetchError::MalformedResponse(format!(
                "provider error: {}",
                body.error_type.as_deref().unwrap_or("unknown")
            )));
        }
        Some(other) => {
            return Err(FetchError::MalformedResponse(format!(
                "unexpected result indicator {other:?}"
            )));
        }
        None => {
            return Err(FetchError::MalformedResponse(
                "missing result indicator".into(),
            ));
        }
    }

    if let Some(code) = body.base_code.as_deref() {
        if CurrencyCode::parse(code).ok().as_ref() != Some(base) {
            return Err(FetchError::MalformedResponse(format!(
                "asked for {base}, provider answered for {code}"
            )));
        }
    }

    let updated_at = provider_timestamp(&body)?;

    let raw_rates = body
        .rates
        .ok_or_else(|| FetchError::MalformedResponse("missing rates".into()))?;
    let mut rates = BTreeMap::new();
    for (code, rate) in raw_rates {
        let code = CurrencyCode::parse(&code)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
        rates.insert(code, rate);
    }

    Ok(RateSnapshot::new(base.clone(), rates, fetched_at)?.with_provider_updated_at(updated_at))
}

fn provider_timestamp(body: &LatestRatesBody) -> Result<DateTime<Utc>, FetchError> {
    if let Some(secs) = body.time_last_update_unix {
        return DateTime::from_timestamp(secs, 0).ok_or_else(|| {
            FetchError::MalformedResponse(format!("timestamp out of range: {secs}"))
        });
    }
    if let Some(text) = body.time_last_update_utc.as_deref() {
        return DateTime::parse_from_rfc2822(text)
            .map(|at| at.with_timezone(&Utc))
            .map_err(|e| FetchError::MalformedResponse(format!("bad timestamp {text:?}: {e}")));
    }
    Err(FetchError::MalformedResponse(
        "missing last-update timestamp".into(),
    ))
}
