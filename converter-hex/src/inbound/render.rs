//! Text rendering of session views.

use std::fmt::Write as _;

use chrono::Local;

use converter_types::{FetchState, SessionView};

pub const LOADING_MESSAGE: &str = "Fetching latest rates...";

/// Full screen: selection header, error banner, result or loading line, and
/// the last-updated footer.
pub fn render_view(view: &SessionView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} -> {} {}   [{}]",
        view.from.glyph(),
        view.from,
        view.to.glyph(),
        view.to,
        view.status
    );
    let _ = writeln!(out, "Amount: {}", view.amount);

    if let Some(error) = view.fetch_state.error() {
        let _ = writeln!(out, "Error: {} (type `retry` to try again)", error.message);
    }

    if view.fetch_state.is_loading() {
        let _ = writeln!(out, "{}", LOADING_MESSAGE);
    } else if let Some(result) = render_result(view) {
        out.push_str(&result);
    }

    if let FetchState::Loaded(snapshot) = &view.fetch_state {
        let updated = snapshot.last_updated().with_timezone(&Local);
        let _ = writeln!(out, "Updated {}", updated.format("%H:%M:%S"));
    }
    out
}

/// The conversion block, when there is something to show:
///
/// ```text
/// 10 USD =
///   9 EUR
/// 1 EUR = 1.111111 USD
/// ```
pub fn render_result(view: &SessionView) -> Option<String> {
    let out = view.conversion.as_ref()?;
    Some(format!(
        "{} {} =\n  {} {}\n1 {} = {} {}\n",
        out.amount_display(),
        view.from,
        out.converted_display(),
        view.to,
        view.to,
        out.inverse_display(),
        view.from
    ))
}

/// One line per quoted currency: glyph, code and rate from the base.
pub fn render_currencies(view: &SessionView) -> String {
    let Some(snapshot) = view.fetch_state.snapshot() else {
        return format!("No rates loaded for {}\n", view.from);
    };
    let mut out = String::new();
    let _ = writeln!(out, "1 {} buys:", snapshot.base());
    for (code, rate) in snapshot.rates() {
        let _ = writeln!(out, "  {} {}  {}", code.glyph(), code, rate);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use converter_types::{
        ConversionInput, CurrencyCode, ErrorDetail, FetchError, RateSnapshot, StatusIndicator,
    };

    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn view_for(state: FetchState, amount: &str) -> SessionView {
        let input = ConversionInput::new(amount, code("USD"), code("EUR")).unwrap();
        let conversion = state.snapshot().and_then(|s| input.output(s));
        SessionView {
            from: code("USD"),
            to: code("EUR"),
            amount: amount.to_string(),
            status: state.status_indicator(),
            currencies: state.snapshot().map(|s| s.currencies()).unwrap_or_default(),
            rate: state.snapshot().and_then(|s| s.rate(&code("EUR"))),
            conversion,
            fetch_state: state,
        }
    }

    fn loaded() -> FetchState {
        let rates: BTreeMap<_, _> = [(code("EUR"), 0.9), (code("GBP"), 0.8)].into();
        FetchState::Loaded(RateSnapshot::new(code("USD"), rates, Utc::now()).unwrap())
    }

    #[test]
    fn test_loaded_view_shows_result_and_footer() {
        let text = render_view(&view_for(loaded(), "1234.5"));
        assert!(text.contains("[Live]"));
        assert!(text.contains("1,234.5 USD ="));
        assert!(text.contains("  1,111.05 EUR"));
        assert!(text.contains("1 EUR = 1.111111 USD"));
        assert!(text.contains("Updated "));
        assert!(!text.contains("Error:"));
    }

    #[test]
    fn test_loading_view_shows_spinner_text() {
        let view = view_for(FetchState::Loading, "10");
        assert_eq!(view.status, StatusIndicator::Updating);
        let text = render_view(&view);
        assert!(text.contains(LOADING_MESSAGE));
        assert!(!text.contains("Updated"));
    }

    #[test]
    fn test_failed_view_shows_banner_only() {
        let detail = ErrorDetail::from(&FetchError::MalformedResponse("missing rates".into()));
        let text = render_view(&view_for(FetchState::Failed(detail), "10"));
        assert!(text.contains("[Offline]"));
        assert!(text.contains("Error: Could not fetch exchange rates."));
        assert!(!text.contains("missing rates"));
        assert!(!text.contains(" = "));
    }

    #[test]
    fn test_empty_amount_renders_no_result() {
        let view = view_for(loaded(), "");
        assert!(render_result(&view).is_none());
    }

    #[test]
    fn test_currency_listing() {
        let text = render_currencies(&view_for(loaded(), "1"));
        assert!(text.starts_with("1 USD buys:"));
        assert!(text.contains("🇪🇺 EUR  0.9"));
        assert!(text.contains("🇬🇧 GBP  0.8"));

        let text = render_currencies(&view_for(FetchState::Idle, "1"));
        assert_eq!(text, "No rates loaded for USD\n");
    }
}
