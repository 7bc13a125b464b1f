//! Conversion Session
//!
//! The one coordinating state container: the from/to/amount selection plus
//! the rate store for the selected base. Presentation adapters read
//! [`SessionView`] snapshots and call the five user operations.

use tracing::debug;

use converter_types::{AppError, ConversionInput, CurrencyCode, RateProvider, SessionView};

use crate::RateStore;

/// Application service for one converter screen.
pub struct ConverterSession<P: RateProvider + 'static> {
    store: RateStore<P>,
    input: ConversionInput,
}

impl<P: RateProvider + 'static> ConverterSession<P> {
    /// Creates a session. No fetch is issued until [`ConverterSession::start`].
    pub fn new(provider: P, input: ConversionInput) -> Self {
        Self {
            store: RateStore::new(provider),
            input,
        }
    }

    /// Issues the first fetch for the initial source currency.
    pub fn start(&self) -> bool {
        self.store.set_base_currency(self.input.from().clone())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // User Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Selects the source currency, which is also the fetched base.
    pub fn select_from(&mut self, from: CurrencyCode) -> bool {
        self.input.set_from(from.clone());
        self.store.set_base_currency(from)
    }

    /// Selects the target currency. Never fetches.
    pub fn select_to(&mut self, to: CurrencyCode) {
        self.input.set_to(to);
    }

    /// Applies amount text as typed. Rejected text is ignored; the amount
    /// after the edit is returned either way.
    pub fn edit_amount(&mut self, raw: &str) -> &str {
        if let Err(e) = self.input.edit_amount(raw) {
            debug!("Ignoring amount edit: {}", e);
        }
        self.input.amount()
    }

    /// Exchanges from and to together, then fetches for the new base once.
    pub fn swap(&mut self) -> bool {
        self.input.swap();
        self.store.set_base_currency(self.input.from().clone())
    }

    /// Re-issues the fetch for the current base. Only valid after a failure.
    pub fn retry(&self) -> Result<(), AppError> {
        self.store.retry()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Views
    // ─────────────────────────────────────────────────────────────────────────────

    /// Builds the current view. Conversion output is recomputed every call.
    pub fn view(&self) -> SessionView {
        let fetch_state = self.store.state();
        let snapshot = fetch_state.snapshot();

        let currencies = snapshot.map(|s| s.currencies()).unwrap_or_default();
        let rate = snapshot
            .filter(|s| s.base() == self.input.from())
            .and_then(|s| s.rate(self.input.to()));
        let conversion = snapshot.and_then(|s| self.input.output(s));
        let status = fetch_state.status_indicator();

        SessionView {
            from: self.input.from().clone(),
            to: self.input.to().clone(),
            amount: self.input.amount().to_string(),
            status,
            fetch_state,
            currencies,
            rate,
            conversion,
        }
    }

    /// Waits for any pending fetch to resolve, then builds the view.
    pub async fn settled(&self) -> SessionView {
        self.store.settled().await;
        self.view()
    }
}
