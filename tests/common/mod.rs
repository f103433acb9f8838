#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use httpmock::{Method::GET, Mock, MockServer};
use quote_returns::{
    AttemptObserver, AttemptRecord, Backoff, CredentialError, QuoteClient, QuoteClientBuilder,
    RetryConfig, SecretSource,
};
use url::Url;

pub const API_KEY: &str = "test-key-123";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(endpoint: &str, symbol: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{}_{}.{}", endpoint, symbol, ext);
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn query_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/query", server.base_url())).unwrap()
}

/// Same attempt budget as production, with millisecond waits.
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        backoff: Backoff::Fixed(Duration::from_millis(1)),
        ..RetryConfig::default()
    }
}

pub fn builder(server: &MockServer) -> QuoteClientBuilder {
    QuoteClient::builder()
        .base_query(query_url(server))
        .api_key(API_KEY)
        .retry_config(fast_retry())
}

pub fn client(server: &MockServer) -> QuoteClient {
    builder(server).build().unwrap()
}

/// Provider answer for `GLOBAL_QUOTE` on `symbol`.
pub fn mock_global_quote<'a>(
    server: &'a MockServer,
    symbol: &'a str,
    status: u16,
    body: &str,
) -> Mock<'a> {
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(GET)
            .path("/query")
            .query_param("function", "GLOBAL_QUOTE")
            .query_param("symbol", symbol)
            .query_param("apikey", API_KEY);
        then.status(status)
            .header("content-type", "application/json")
            .body(body.as_str());
    })
}

/// Collects every attempt record.
#[derive(Default)]
pub struct RecordingObserver(Mutex<Vec<AttemptRecord>>);

impl RecordingObserver {
    pub fn records(&self) -> Vec<AttemptRecord> {
        self.0.lock().unwrap().clone()
    }
}

impl AttemptObserver for RecordingObserver {
    fn on_attempt(&self, record: &AttemptRecord) {
        self.0.lock().unwrap().push(record.clone());
    }
}

/// Secret source that counts lookups and answers slowly enough for callers to pile up.
#[derive(Debug)]
pub struct CountingSource {
    pub calls: AtomicUsize,
    answer: Result<String, CredentialError>,
}

impl CountingSource {
    pub fn ok(key: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            answer: Ok(format!(r#"{{"apiKey":"{key}"}}"#)),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            answer: Err(CredentialError::Lookup {
                secret_id: "test/secret".into(),
                reason: "access denied".into(),
            }),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SecretSource for CountingSource {
    fn fetch_secret<'a>(
        &'a self,
        _secret_id: &'a str,
    ) -> BoxFuture<'a, Result<String, CredentialError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.answer.clone()
        })
    }
}
