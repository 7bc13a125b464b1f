//! In-memory rate providers for service-level tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::oneshot;

use converter_types::{CurrencyCode, FetchError, RateProvider, RateSnapshot};

pub fn code(s: &str) -> CurrencyCode {
    CurrencyCode::parse(s).unwrap()
}

pub fn snapshot(base: &str, rates: &[(&str, f64)]) -> RateSnapshot {
    let rates: BTreeMap<_, _> = rates.iter().map(|(c, r)| (code(c), *r)).collect();
    RateSnapshot::new(code(base), rates, Utc::now()).unwrap()
}

pub fn server_error() -> FetchError {
    FetchError::NetworkFailure {
        status: Some(500),
        message: "Internal Server Error".into(),
    }
}

/// Answers immediately from a fixed table, recording every call.
pub struct MockProvider {
    responses: Mutex<HashMap<CurrencyCode, Result<RateSnapshot, FetchError>>>,
    calls: Mutex<Vec<CurrencyCode>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with(self, base: &str, response: Result<RateSnapshot, FetchError>) -> Self {
        self.set(base, response);
        self
    }

    /// Replaces the answer for `base` on later calls.
    pub fn set(&self, base: &str, response: Result<RateSnapshot, FetchError>) {
        self.responses.lock().unwrap().insert(code(base), response);
    }

    pub fn calls(&self) -> Vec<CurrencyCode> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RateProvider for MockProvider {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateSnapshot, FetchError> {
        self.calls.lock().unwrap().push(base.clone());
        self.responses
            .lock()
            .unwrap()
            .get(base)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::MalformedResponse("unsupported-code".into())))
    }
}

type Gate = oneshot::Sender<Result<RateSnapshot, FetchError>>;

/// Holds every fetch open until the test resolves it, so completions can be
/// forced into any order.
pub struct GatedProvider {
    pending: Mutex<Vec<(CurrencyCode, Gate)>>,
    calls: Mutex<Vec<CurrencyCode>>,
}

impl GatedProvider {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CurrencyCode> {
        self.calls.lock().unwrap().clone()
    }

    /// Yields until a fetch for `base` is parked on its gate.
    pub async fn wait_pending(&self, base: &str) {
        let base = code(base);
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if self.pending.lock().unwrap().iter().any(|(b, _)| *b == base) {
                    return;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("fetch never started");
    }

    /// Yields until the open fetch for `base` has been dropped by its task.
    pub async fn wait_cancelled(&self, base: &str) {
        let base = code(base);
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let closed = self
                    .pending
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|(b, _)| *b == base)
                    .all(|(_, gate)| gate.is_closed());
                if closed {
                    return;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("fetch was never cancelled");
    }

    /// Completes the oldest open fetch for `base`. Returns false when that
    /// fetch was already cancelled, or none was open.
    pub fn resolve(&self, base: &str, result: Result<RateSnapshot, FetchError>) -> bool {
        let base = code(base);
        let gate = {
            let mut pending = self.pending.lock().unwrap();
            pending
                .iter()
                .position(|(b, _)| *b == base)
                .map(|i| pending.remove(i).1)
        };
        match gate {
            Some(gate) => gate.send(result).is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl RateProvider for GatedProvider {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateSnapshot, FetchError> {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().unwrap().push(base.clone());
        self.pending.lock().unwrap().push((base.clone(), tx));
        rx.await.unwrap_or_else(|_| {
            Err(FetchError::NetworkFailure {
                status: None,
                message: "gate dropped".into(),
            })
        })
    }
}

/// Lets the spawned fetch task run to completion on the test runtime.
pub async fn settle<P: RateProvider + 'static>(store: &crate::RateStore<P>) {
    tokio::time::timeout(Duration::from_secs(5), store.settled())
        .await
        .expect("store never settled");
}
