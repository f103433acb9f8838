use std::sync::Arc;
use std::time::Duration;

use crate::common;
use httpmock::Method::GET;
use quote_returns::{Backoff, OutcomeKind, QuoteClient, QuoteOutcome, RetryConfig, Symbol};
use url::Url;

#[tokio::test]
async fn persistent_5xx_uses_all_three_attempts() {
    let server = common::setup_server();
    let fail_mock = common::mock_global_quote(&server, "RETRY", 503, "Service Unavailable");

    let observer = Arc::new(common::RecordingObserver::default());
    let client = common::builder(&server)
        .observer(observer.clone())
        .build()
        .unwrap();

    let out = client.fetch_quote(&Symbol::parse("RETRY").unwrap()).await;

    fail_mock.assert_hits(3);
    assert_eq!(
        out,
        QuoteOutcome::TransientFault("provider returned status 503".into())
    );

    let attempts: Vec<_> = observer.records().iter().map(|r| r.attempt).collect();
    assert_eq!(attempts, vec![0, 1, 2]);
}

#[tokio::test]
async fn malformed_twice_then_valid_quote_succeeds_on_third_attempt() {
    let server = common::setup_server();

    // Defined first, so it answers until it is deleted.
    let mut bad = common::mock_global_quote(&server, "AAPL", 200, "<html>upstream hiccup</html>");
    let good = common::mock_global_quote(
        &server,
        "AAPL",
        200,
        &common::fixture("global_quote", "AAPL", "json"),
    );

    let observer = Arc::new(common::RecordingObserver::default());
    let client = common::builder(&server)
        .retry_config(RetryConfig {
            backoff: Backoff::Exponential {
                base: Duration::from_millis(150),
                factor: 2.0,
                max: Duration::from_secs(5),
            },
            ..RetryConfig::default()
        })
        .observer(observer.clone())
        .build()
        .unwrap();

    let sym = Symbol::parse("AAPL").unwrap();
    let (out, ()) = tokio::join!(client.fetch_quote(&sym), async {
        // Retire the malformed answer once it has been served twice.
        while bad.hits_async().await < 2 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        bad.delete_async().await;
    });

    good.assert_hits(1);
    assert!(matches!(out, QuoteOutcome::Success(_)), "{out:?}");

    let records = observer.records();
    let kinds: Vec<_> = records.iter().map(|r| r.outcome).collect();
    assert_eq!(
        kinds,
        vec![
            OutcomeKind::TransientFault,
            OutcomeKind::TransientFault,
            OutcomeKind::Success
        ]
    );
    let delays: Vec<_> = records.iter().map(|r| r.delay).collect();
    assert_eq!(
        delays,
        vec![
            Duration::ZERO,
            Duration::from_millis(150),
            Duration::from_millis(300)
        ]
    );
}

#[tokio::test]
async fn transport_failure_is_transient_and_hides_the_key() {
    // Nothing listens on port 1.
    let client = QuoteClient::builder()
        .base_query(Url::parse("http://127.0.0.1:1/query").unwrap())
        .api_key(common::API_KEY)
        .retry_config(common::fast_retry())
        .build()
        .unwrap();

    let out = client.fetch_quote(&Symbol::parse("AAPL").unwrap()).await;

    let QuoteOutcome::TransientFault(cause) = out else {
        panic!("expected transient fault, got {out:?}");
    };
    assert!(!cause.contains(common::API_KEY), "{cause}");
}

#[tokio::test]
async fn slow_provider_times_out_on_every_attempt() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/query");
        then.status(200)
            .delay(Duration::from_millis(500))
            .header("content-type", "application/json")
            .body(common::fixture("global_quote", "AAPL", "json"));
    });

    let client = common::builder(&server)
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let out = client.fetch_quote(&Symbol::parse("AAPL").unwrap()).await;

    mock.assert_hits(3);
    let QuoteOutcome::TransientFault(cause) = out else {
        panic!("expected transient fault, got {out:?}");
    };
    assert!(cause.contains("timed out"), "{cause}");
    assert!(!cause.contains(common::API_KEY), "{cause}");
}

#[tokio::test]
async fn retries_disabled_makes_a_single_attempt() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/query");
        then.status(500).body("{}");
    });

    let client = common::builder(&server)
        .retry_enabled(false)
        .build()
        .unwrap();
    let out = client.fetch_quote(&Symbol::parse("AAPL").unwrap()).await;

    mock.assert_hits(1);
    assert!(matches!(out, QuoteOutcome::TransientFault(_)));
}
