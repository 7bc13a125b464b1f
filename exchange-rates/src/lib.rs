//! Currency codes, conversion arithmetic and amount entry rules.
//!
//! This crate is pure: no IO, no clocks, no shared state. It holds the three
//! pieces of the converter that are plain functions of their inputs:
//!
//! - [`CurrencyCode`] and the static glyph table used for display
//! - [`convert`] / [`convert_amount`], which turn an amount and a rate into a
//!   [`ConversionOutput`] with its display strings
//! - [`amount::validate`], which constrains free-text amount entry
//!
//! # Adding a Glyph
//! Add a line to the `define_currencies!` invocation below:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     "ISK" => "🇮🇸",
//! }
//! ```
//!
//! # Example
//! ```
//! use exchange_rates::{CurrencyCode, convert_amount};
//!
//! let eur: CurrencyCode = "eur".parse().unwrap();
//! assert_eq!(eur.as_str(), "EUR");
//!
//! let out = convert_amount("10", 0.9).unwrap();
//! assert_eq!(out.converted_display(), "9");
//! assert_eq!(out.inverse_display(), "1.111111");
//! ```

pub mod amount;
mod convert;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use amount::AmountError;
pub use convert::{
    CONVERTED_MAX_FRACTION_DIGITS, ConversionOutput, INVERSE_FRACTION_DIGITS,
    SOURCE_MAX_FRACTION_DIGITS, convert, convert_amount, format_fixed, format_grouped,
    parse_amount,
};

// ─────────────────────────────────────────────────────────────────────────────
// Currency Code
// ─────────────────────────────────────────────────────────────────────────────

/// Rejected currency code text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid currency code: {0:?}")]
pub struct InvalidCurrencyCode(pub String);

/// A three-letter, uppercase currency code such as `USD`.
///
/// Only the shape is checked. Whether the provider actually quotes the
/// currency is decided by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses a code, trimming whitespace and uppercasing it.
    pub fn parse(input: &str) -> Result<Self, InvalidCurrencyCode> {
        let trimmed = input.trim();
        if trimmed.len() != 3 || !trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(InvalidCurrencyCode(input.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display glyph for this currency, or a neutral flag when none is known.
    pub fn glyph(&self) -> &'static str {
        glyph_for(&self.0).unwrap_or(FALLBACK_GLYPH)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = InvalidCurrencyCode;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = InvalidCurrencyCode;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: static currency -> glyph lookup table
// ─────────────────────────────────────────────────────────────────────────────

/// Glyph shown for codes missing from the table.
pub const FALLBACK_GLYPH: &str = "🏳️";

/// Defines the glyph table and its lookup function.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     "CODE" => "GLYPH",
/// }
/// ```
macro_rules! define_currencies {
    (
        $( $code:literal => $glyph:literal ),* $(,)?
    ) => {
        /// Looks up the display glyph for a currency code.
        pub fn glyph_for(code: &str) -> Option<&'static str> {
            match code {
                $( $code => Some($glyph), )*
                _ => None,
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// GLYPH DEFINITIONS
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    "USD" => "🇺🇸", "EUR" => "🇪🇺", "JPY" => "🇯🇵", "GBP" => "🇬🇧", "AUD" => "🇦🇺",
    "CAD" => "🇨🇦", "CHF" => "🇨🇭", "CNY" => "🇨🇳", "HKD" => "🇭🇰", "NZD" => "🇳🇿",
    "SEK" => "🇸🇪", "KRW" => "🇰🇷", "SGD" => "🇸🇬", "NOK" => "🇳🇴", "MXN" => "🇲🇽",
    "INR" => "🇮🇳", "RUB" => "🇷🇺", "ZAR" => "🇿🇦", "TRY" => "🇹🇷", "BRL" => "🇧🇷",
    "TWD" => "🇹🇼", "DKK" => "🇩🇰", "PLN" => "🇵🇱", "THB" => "🇹🇭", "IDR" => "🇮🇩",
    "HUF" => "🇭🇺", "CZK" => "🇨🇿", "ILS" => "🇮🇱", "CLP" => "🇨🇱", "PHP" => "🇵🇭",
    "AED" => "🇦🇪", "COP" => "🇨🇴", "SAR" => "🇸🇦", "MYR" => "🇲🇾", "RON" => "🇷🇴",
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
