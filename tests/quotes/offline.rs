use crate::common;
use quote_returns::{QuoteOutcome, Symbol};
use rust_decimal::Decimal;

#[tokio::test]
async fn global_quote_success_parses_price() {
    let server = common::setup_server();
    let mock = common::mock_global_quote(
        &server,
        "AAPL",
        200,
        &common::fixture("global_quote", "AAPL", "json"),
    );

    let client = common::client(&server);
    let out = client.fetch_quote(&Symbol::parse("aapl").unwrap()).await;

    mock.assert();
    let QuoteOutcome::Success(q) = out else {
        panic!("expected success, got {out:?}");
    };
    assert_eq!(q.symbol.as_str(), "AAPL");
    assert_eq!(q.price, Decimal::new(200, 0));
    assert_eq!(q.previous_close, Some(Decimal::new(1985, 1)));
}

#[tokio::test]
async fn error_message_is_not_found_and_not_retried() {
    let server = common::setup_server();
    let mock = common::mock_global_quote(
        &server,
        "ZZZZ",
        200,
        &common::fixture("global_quote", "error", "json"),
    );

    let client = common::client(&server);
    let sym = Symbol::parse("ZZZZ").unwrap();
    let out = client.fetch_quote(&sym).await;

    mock.assert_hits(1);
    assert_eq!(out, QuoteOutcome::NotFound(sym));
}

#[tokio::test]
async fn frequency_note_is_rate_limited_and_not_retried() {
    let server = common::setup_server();
    let mock = common::mock_global_quote(
        &server,
        "MSFT",
        200,
        &common::fixture("global_quote", "note", "json"),
    );

    let client = common::client(&server);
    let out = client.fetch_quote(&Symbol::parse("MSFT").unwrap()).await;

    mock.assert_hits(1);
    assert_eq!(out, QuoteOutcome::RateLimited);
}

#[tokio::test]
async fn daily_quota_information_is_rate_limited() {
    let server = common::setup_server();
    let mock = common::mock_global_quote(
        &server,
        "MSFT",
        200,
        &common::fixture("global_quote", "information", "json"),
    );

    let client = common::client(&server);
    let out = client.fetch_quote(&Symbol::parse("MSFT").unwrap()).await;

    mock.assert_hits(1);
    assert_eq!(out, QuoteOutcome::RateLimited);
}

#[tokio::test]
async fn empty_global_quote_is_transient() {
    let server = common::setup_server();
    let mock = common::mock_global_quote(
        &server,
        "IBM",
        200,
        &common::fixture("global_quote", "empty", "json"),
    );

    let client = common::client(&server);
    let out = client.fetch_quote(&Symbol::parse("IBM").unwrap()).await;

    mock.assert_hits(3);
    assert!(matches!(out, QuoteOutcome::TransientFault(_)), "{out:?}");
}
