//! Amount entry rules.
//!
//! Free-text amount entry accepts ASCII digits with at most one decimal
//! point. The empty string is accepted as an in-progress state. Rejected text
//! never replaces the previously accepted value.

use std::sync::LazyLock;

use regex::Regex;

static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII only: `\d` would also admit other Unicode decimal digits.
    Regex::new(r"^[0-9]*\.?[0-9]*$").expect("amount pattern compiles")
});

/// Why amount text was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Invalid amount input: {0:?}")]
    InvalidInput(String),
}

/// Accepts and normalizes amount text, or explains why it was rejected.
///
/// Normalization:
/// - `"."` becomes `"0."`
/// - a leading zero followed by another digit is rewritten in canonical
///   decimal form (`"01"` -> `"1"`, `"007.50"` -> `"7.5"`, `"00."` -> `"0"`)
///   without going through a float, so every significant digit is kept
pub fn accept(raw: &str) -> Result<String, AmountError> {
    if !AMOUNT_PATTERN.is_match(raw) {
        return Err(AmountError::InvalidInput(raw.to_string()));
    }
    Ok(normalize(raw))
}

/// Returns the value the amount field should hold after the user typed `raw`.
///
/// Rejected input yields `previous` unchanged.
pub fn validate(raw: &str, previous: &str) -> String {
    accept(raw).unwrap_or_else(|_| previous.to_string())
}

fn normalize(accepted: &str) -> String {
    if accepted == "." {
        return "0.".to_string();
    }
    let bytes = accepted.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' && bytes[1] != b'.' {
        return canonical_decimal(accepted);
    }
    accepted.to_string()
}

fn canonical_decimal(digits: &str) -> String {
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    match frac_part.trim_end_matches('0') {
        "" => int_part.to_string(),
        frac => format!("{}.{}", int_part, frac),
    }
}
