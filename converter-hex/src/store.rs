//! Rate Store
//!
//! Owns the fetch lifecycle for the currently selected base currency.
//!
//! Every fetch is tagged with a generation number. Starting a new fetch bumps
//! the generation and aborts the task of the previous one; a completion whose
//! generation is no longer current is dropped without touching state. Only
//! the most recently issued fetch can ever update the visible [`FetchState`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use converter_types::{
    AppError, CurrencyCode, ErrorDetail, FetchError, FetchState, RateProvider, RateSnapshot,
};

/// Fetch lifecycle for one base currency at a time.
///
/// Mutating methods spawn onto the current Tokio runtime and return
/// immediately; observe progress with [`RateStore::state`] or await it with
/// [`RateStore::settled`].
pub struct RateStore<P: RateProvider + 'static> {
    provider: Arc<P>,
    shared: Arc<Shared>,
}

struct Shared {
    inner: Mutex<Inner>,
    state: watch::Sender<FetchState>,
}

#[derive(Default)]
struct Inner {
    base: Option<CurrencyCode>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publishes a fetch result if `generation` is still current.
    fn complete(&self, generation: u64, result: Result<RateSnapshot, FetchError>) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(
                generation,
                current = inner.generation,
                "Discarding stale fetch result"
            );
            return false;
        }
        inner.in_flight = None;

        let next = match result {
            Ok(snapshot) => {
                info!(base = %snapshot.base(), "Rates loaded");
                FetchState::Loaded(snapshot)
            }
            Err(err) => {
                warn!(kind = ?err.kind(), "Rate fetch failed: {}", err);
                FetchState::Failed(ErrorDetail::from(&err))
            }
        };
        self.state.send_replace(next);
        true
    }
}

impl<P: RateProvider + 'static> RateStore<P> {
    /// Creates an idle store backed by `provider`.
    pub fn new(provider: P) -> Self {
        Self::from_shared_provider(Arc::new(provider))
    }

    /// Creates an idle store around an already shared provider.
    pub fn from_shared_provider(provider: Arc<P>) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        Self {
            provider,
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::default()),
                state,
            }),
        }
    }

    /// Current state, cloned.
    pub fn state(&self) -> FetchState {
        self.shared.state.borrow().clone()
    }

    /// Base currency the store is tracking, if one was ever selected.
    pub fn base_currency(&self) -> Option<CurrencyCode> {
        self.shared.lock().base.clone()
    }

    /// Receiver that sees every state change.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.shared.state.subscribe()
    }

    /// Waits until no fetch is pending, then returns the state.
    pub async fn settled(&self) -> FetchState {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Switches to `base` and fetches its rates.
    ///
    /// Selecting the base already tracked does nothing. Otherwise the state
    /// becomes `Loading` and any fetch still in flight is cancelled. Returns
    /// whether a fetch was issued.
    pub fn set_base_currency(&self, base: CurrencyCode) -> bool {
        let mut inner = self.shared.lock();
        if inner.base.as_ref() == Some(&base) {
            debug!(%base, "Base currency unchanged, not refetching");
            return false;
        }
        inner.base = Some(base.clone());
        self.start_fetch(&mut inner, base);
        true
    }

    /// Re-fetches the current base after a failure.
    pub fn retry(&self) -> Result<(), AppError> {
        let mut inner = self.shared.lock();
        let (failed, state) = {
            let current = self.shared.state.borrow();
            (current.is_failed(), current.label())
        };
        let base = match inner.base.clone() {
            Some(base) if failed => base,
            _ => return Err(AppError::RetryUnavailable { state }),
        };
        info!(%base, "Retrying rate fetch");
        self.start_fetch(&mut inner, base);
        Ok(())
    }

    fn start_fetch(&self, inner: &mut Inner, base: CurrencyCode) {
        inner.generation += 1;
        let generation = inner.generation;

        if let Some(handle) = inner.in_flight.take() {
            debug!(generation, "Cancelling superseded fetch");
            handle.abort();
        }
        self.shared.state.send_replace(FetchState::Loading);
        info!(%base, generation, "Fetching rates");

        let provider = Arc::clone(&self.provider);
        let shared = Arc::clone(&self.shared);
        inner.in_flight = Some(tokio::spawn(async move {
            let result = provider.fetch_rates(&base).await;
            shared.complete(generation, result);
        }));
    }

    /// Generation of the most recently issued fetch.
    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.shared.lock().generation
    }

    /// Feeds a result as if the fetch of `generation` had just finished.
    #[cfg(test)]
    pub(crate) fn apply_result(
        &self,
        generation: u64,
        result: Result<RateSnapshot, FetchError>,
    ) -> bool {
        self.shared.complete(generation, result)
    }
}

impl<P: RateProvider + 'static> Drop for RateStore<P> {
    fn drop(&mut self) {
        if let Some(handle) = self.shared.lock().in_flight.take() {
            handle.abort();
        }
    }
}
