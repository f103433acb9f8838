//! Fetching a live quote: one provider call per attempt, classified, retried on transient faults.

mod classify;
pub mod observer;
mod wire;

use std::future::Future;

use chrono::Utc;

use crate::core::client::{Credential, RetryConfig};
use crate::core::{QrError, Quote, QuoteClient, Symbol, net};
use observer::{AttemptObserver, AttemptRecord};

/// The interpreted result of asking the provider for a quote.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteOutcome {
    Success(Quote),
    /// The provider says the symbol does not exist.
    NotFound(Symbol),
    /// The provider refused the call because of request frequency or quota.
    RateLimited,
    /// Anything ambiguous or recoverable: bad status, transport error, malformed body.
    TransientFault(String),
    /// The credential could not be resolved; the provider was never called.
    Fatal(String),
}

/// Payload-free tag of a [`QuoteOutcome`], used in attempt records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    NotFound,
    RateLimited,
    TransientFault,
    Fatal,
}

impl OutcomeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::TransientFault => "transient_fault",
            Self::Fatal => "fatal",
        }
    }
}

impl QuoteOutcome {
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success(_) => OutcomeKind::Success,
            Self::NotFound(_) => OutcomeKind::NotFound,
            Self::RateLimited => OutcomeKind::RateLimited,
            Self::TransientFault(_) => OutcomeKind::TransientFault,
            Self::Fatal(_) => OutcomeKind::Fatal,
        }
    }

    /// Only transient faults are worth another attempt.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientFault(_))
    }

    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::TransientFault(c) | Self::Fatal(c) => Some(c),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// Every variant except `Success` becomes the matching [`QrError`].
    pub fn into_result(self) -> Result<Quote, QrError> {
        match self {
            Self::Success(q) => Ok(q),
            Self::NotFound(symbol) => Err(QrError::NotFound {
                symbol: symbol.into(),
            }),
            Self::RateLimited => Err(QrError::RateLimited),
            Self::TransientFault(cause) => Err(QrError::Transient(cause)),
            Self::Fatal(cause) => Err(QrError::Fatal(cause)),
        }
    }
}

impl QuoteClient {
    /// Fetch the current quote for `symbol`, retrying transient faults per the client's policy.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(symbol = %symbol)))]
    pub async fn fetch_quote(&self, symbol: &Symbol) -> QuoteOutcome {
        fetch_quote(self, symbol).await
    }
}

/// Fetch the current quote for `symbol` with `client`.
pub async fn fetch_quote(client: &QuoteClient, symbol: &Symbol) -> QuoteOutcome {
    let credential = match client.credential().await {
        Ok(c) => c,
        Err(e) => {
            let outcome = QuoteOutcome::Fatal(e.to_string());
            client.observer().on_attempt(&AttemptRecord {
                attempt: 0,
                symbol: symbol.clone(),
                outcome: outcome.kind(),
                delay: std::time::Duration::ZERO,
                cause: outcome.cause().map(str::to_string),
            });
            return outcome;
        }
    };

    run_with_retry(client.retry_config(), symbol, client.observer(), |_| {
        attempt_once(client, symbol, &credential)
    })
    .await
}

async fn attempt_once(
    client: &QuoteClient,
    symbol: &Symbol,
    credential: &Credential,
) -> QuoteOutcome {
    let mut url = client.base_query().clone();
    url.query_pairs_mut()
        .append_pair("function", "GLOBAL_QUOTE")
        .append_pair("symbol", symbol.as_str())
        .append_pair("apikey", credential.expose());

    let req = client
        .http()
        .get(url)
        .header("accept", "application/json")
        .timeout(client.timeout());

    match net::get_text(req).await {
        Ok(raw) => classify::classify(symbol, raw.status, &raw.body, Utc::now()),
        Err(cause) => QuoteOutcome::TransientFault(cause),
    }
}

/// Drive `attempt` until it yields a non-retryable outcome or the budget is spent.
pub(crate) async fn run_with_retry<F, Fut>(
    cfg: &RetryConfig,
    symbol: &Symbol,
    observer: &dyn AttemptObserver,
    mut attempt_fn: F,
) -> QuoteOutcome
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = QuoteOutcome>,
{
    let mut attempt = 0;
    loop {
        let delay = cfg.delay_before(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let outcome = attempt_fn(attempt).await;
        observer.on_attempt(&AttemptRecord {
            attempt,
            symbol: symbol.clone(),
            outcome: outcome.kind(),
            delay,
            cause: outcome.cause().map(str::to_string),
        });

        if !cfg.should_retry(&outcome, attempt) {
            return outcome;
        }
        attempt += 1;
    }
}
