//! Conversion arithmetic and display formatting.
//!
//! The converted value and the inverse rate are formatted under different
//! policies: the converted value is grouped with up to six fractional digits
//! (trailing zeros dropped), while the inverse rate always shows exactly six
//! fractional digits and no grouping.

use serde::Serialize;

/// Upper bound on fractional digits shown for a converted value.
pub const CONVERTED_MAX_FRACTION_DIGITS: usize = 6;

/// Fixed fractional digits shown for an inverse rate.
pub const INVERSE_FRACTION_DIGITS: usize = 6;

/// Upper bound on fractional digits shown when echoing the source amount.
pub const SOURCE_MAX_FRACTION_DIGITS: usize = 2;

/// Result of converting one amount at one rate.
///
/// Derived on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConversionOutput {
    pub amount: f64,
    pub converted_value: f64,
    pub inverse_rate: f64,
    pub display_precision: u32,
}

impl ConversionOutput {
    /// Converted value, grouped, at most six fractional digits.
    pub fn converted_display(&self) -> String {
        format_grouped(self.converted_value, self.display_precision as usize)
    }

    /// Inverse rate with exactly six fractional digits.
    pub fn inverse_display(&self) -> String {
        format_fixed(self.inverse_rate, INVERSE_FRACTION_DIGITS)
    }

    /// Source amount, grouped, at most two fractional digits.
    pub fn amount_display(&self) -> String {
        format_grouped(self.amount, SOURCE_MAX_FRACTION_DIGITS)
    }
}

/// Parses amount text into a non-negative finite number.
pub fn parse_amount(amount: &str) -> Option<f64> {
    let value: f64 = amount.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Converts `amount` at `rate`.
///
/// Returns `None` when the rate is not positive and finite, the amount is
/// not non-negative and finite, or the product or inverse overflows. Absence
/// means "nothing to display", not an error.
pub fn convert(amount: f64, rate: f64) -> Option<ConversionOutput> {
    if !(rate.is_finite() && rate > 0.0) || !(amount.is_finite() && amount >= 0.0) {
        return None;
    }
    let converted_value = amount * rate;
    let inverse_rate = 1.0 / rate;
    if !converted_value.is_finite() || !inverse_rate.is_finite() {
        return None;
    }
    Some(ConversionOutput {
        amount,
        converted_value,
        inverse_rate,
        display_precision: CONVERTED_MAX_FRACTION_DIGITS as u32,
    })
}

/// [`convert`] for amount text as entered by the user.
pub fn convert_amount(amount: &str, rate: f64) -> Option<ConversionOutput> {
    convert(parse_amount(amount)?, rate)
}

/// Formats with thousands separators and at most `max_fraction_digits`
/// fractional digits, trailing zeros removed (`1234.5` -> `"1,234.5"`).
pub fn format_grouped(value: f64, max_fraction_digits: usize) -> String {
    let fixed = format!("{:.*}", max_fraction_digits, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && (int_part.bytes().any(|b| b != b'0') || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Formats with exactly `fraction_digits` fractional digits, no grouping.
pub fn format_fixed(value: f64, fraction_digits: usize) -> String {
    format!("{:.*}", fraction_digits, value)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
