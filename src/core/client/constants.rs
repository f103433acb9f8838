//! Centralized constants for default endpoints, UA and configuration keys.

/// Identifies this client to the provider.
pub(crate) const USER_AGENT: &str = concat!("quote-returns/", env!("CARGO_PKG_VERSION"));

/// Alpha Vantage query endpoint (all functions share it).
pub(crate) const DEFAULT_BASE_QUERY: &str = "https://www.alphavantage.co/query";

/// Local HTTP endpoint of the Lambda Parameters and Secrets extension.
pub(crate) const DEFAULT_SECRETS_ENDPOINT: &str = "http://localhost:2773";

/// Secret identifier used when none is configured.
pub(crate) const DEFAULT_SECRET_ID: &str = "quote-returns/alpha-vantage";

/// Per-attempt network timeout for provider calls.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;

/* ----- environment keys read by `QuoteClientBuilder::from_env` ----- */

pub(crate) const ENV_SECRET_ID: &str = "QR_SECRET_ID";
pub(crate) const ENV_API_BASE: &str = "QR_API_BASE";
pub(crate) const ENV_SECRETS_ENDPOINT: &str = "QR_SECRETS_ENDPOINT";
/// When set, names an environment variable holding the secret JSON directly.
pub(crate) const ENV_SECRET_ENV: &str = "QR_SECRET_ENV";
pub(crate) const ENV_TIMEOUT_SECS: &str = "QR_TIMEOUT_SECS";
