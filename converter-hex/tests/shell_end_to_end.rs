//! End-to-end tests: scripted shell input, real HTTP client, local mock
//! provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use converter_client::RateApiClient;
use converter_hex::{ConverterSession, inbound::Shell};
use converter_types::{ConversionInput, CurrencyCode};

#[derive(Default)]
struct ProviderState {
    calls: AtomicUsize,
    /// Number of initial requests answered with HTTP 500.
    failures: AtomicUsize,
}

async fn latest(State(state): State<Arc<ProviderState>>, Path(base): Path<String>) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);
    if state
        .failures
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
    {
        return (StatusCode::INTERNAL_SERVER_ERROR, "unavailable").into_response();
    }

    let rates = match base.as_str() {
        "USD" => json!({ "USD": 1.0, "EUR": 0.9, "GBP": 0.8 }),
        "EUR" => json!({ "EUR": 1.0, "USD": 1.1, "GBP": 0.88 }),
        _ => {
            return Json(json!({ "result": "error", "error-type": "unsupported-code" }))
                .into_response();
        }
    };
    Json(json!({
        "result": "success",
        "base_code": base,
        "time_last_update_unix": 1_700_000_000,
        "rates": rates,
    }))
    .into_response()
}

async fn spawn_provider(state: Arc<ProviderState>) -> String {
    let router = Router::new()
        .route("/v6/latest/{base}", get(latest))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn run_script(url: String, script: &str) -> String {
    let input = ConversionInput::new(
        "1",
        CurrencyCode::parse("USD").unwrap(),
        CurrencyCode::parse("EUR").unwrap(),
    )
    .unwrap();
    let shell = Shell::new(ConverterSession::new(RateApiClient::new(url), input));

    let mut output = Vec::new();
    shell
        .run(tokio::io::BufReader::new(script.as_bytes()), &mut output)
        .await
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_convert_swap_and_list() {
    let state = Arc::new(ProviderState::default());
    let url = spawn_provider(state.clone()).await;

    let output = run_script(url, "10\nswap\nlist\nquit\n").await;

    assert!(output.contains("1 USD =\n  0.9 EUR"), "{output}");
    assert!(output.contains("10 USD =\n  9 EUR"), "{output}");
    assert!(output.contains("1 EUR = 1.111111 USD"), "{output}");
    assert!(output.contains("10 EUR =\n  11 USD"), "{output}");
    assert!(output.contains("1 EUR buys:"), "{output}");
    assert_eq!(state.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_server_error_then_retry() {
    let state = Arc::new(ProviderState::default());
    state.failures.store(1, Ordering::SeqCst);
    let url = spawn_provider(state.clone()).await;

    let output = run_script(url, "retry\nquit\n").await;

    let banner = output
        .find("Error: Could not fetch exchange rates.")
        .expect("error banner");
    let live = output.find("[Live]").expect("recovered view");
    assert!(banner < live);
    assert_eq!(state.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_retry_is_refused_when_loaded() {
    let state = Arc::new(ProviderState::default());
    let url = spawn_provider(state.clone()).await;

    let output = run_script(url, "retry\n").await;

    assert!(output.contains("Retry is only available after a failed fetch"));
    assert_eq!(state.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unsupported_base_fails_and_rejected_amount_is_kept() {
    let state = Arc::new(ProviderState::default());
    let url = spawn_provider(state.clone()).await;

    let output = run_script(url, "amount 12..5\nfrom XYZ\nbogus\n").await;

    assert!(output.contains("Amount: 1\n"), "{output}");
    assert!(!output.contains("12..5\n"), "{output}");
    assert!(output.contains("[Offline]"), "{output}");
    assert!(output.contains("Unknown command: bogus"), "{output}");
}
