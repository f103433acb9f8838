//! quote-returns: resilient stock quote retrieval and return calculation.
//!
//! A request carries a ticker and the price it was bought at. The crate validates both, asks
//! Alpha Vantage for the current price, and answers with the percentage return in the
//! shape an API gateway proxy integration expects.
//!
//! ```no_run
//! # use quote_returns::{Handler, QuoteClient, QuoteRequest};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = QuoteClient::builder().secret_id("prod/alpha-vantage").build()?;
//! let handler = Handler::new(client);
//!
//! let resp = handler
//!     .handle(&QuoteRequest::new(Some("AAPL"), Some("150.00"), "req-1"))
//!     .await;
//! println!("{} {}", resp.status_code, resp.body);
//! # Ok(())
//! # }
//! ```
//!
//! The provider credential is looked up once per [`CredentialProvider`] and shared by every
//! clone of the [`QuoteClient`] built around it.

pub mod core;
pub mod handler;
#[cfg(feature = "tracing-subscriber")]
pub mod logging;
pub mod quote;
pub mod response;
pub mod returns;
pub mod secrets;
pub mod validate;

pub use crate::core::client::{Backoff, Credential, CredentialProvider, RetryConfig};
pub use crate::core::{
    CredentialError, QrError, Quote, QuoteClient, QuoteClientBuilder, ReferencePrice,
    ReturnResult, Symbol, ValidationError,
};
pub use handler::{GatewayEvent, Handler, QuoteRequest};
pub use quote::observer::{AttemptObserver, AttemptRecord, TracingObserver};
pub use quote::{OutcomeKind, QuoteOutcome, fetch_quote};
pub use response::ApiResponse;
pub use secrets::{EnvSecretSource, ExtensionSecretSource, SecretSource, StaticSecretSource};
pub use validate::{ValidatedRequest, validate};
