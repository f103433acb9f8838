use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum QrError {
    /// The caller-supplied parameters were rejected before any provider call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider explicitly rejected the symbol.
    #[error("Invalid symbol: {symbol}")]
    NotFound {
        /// The normalized symbol that was looked up.
        symbol: String,
    },

    /// The provider signaled that the request frequency or daily quota was exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The provider or the transport misbehaved on every attempt.
    #[error("{0}")]
    Transient(String),

    /// The credential subsystem failed; the provider was never called.
    #[error("{0}")]
    Fatal(String),

    /// An error occurred while building the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A configuration value read from the environment could not be used.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Reasons a request is rejected by the validator. The first violated rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required parameters: symbol, initialPrice")]
    MissingParameters,
    #[error("Invalid symbol format. Must be 1-5 letters.")]
    InvalidSymbolFormat,
    #[error("initialPrice must be a positive number")]
    InvalidPrice,
}

/// Failure to resolve the provider API key.
///
/// Messages never include the secret value itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// The secret store could not be reached or answered with an error.
    #[error("Secret lookup failed for {secret_id}: {reason}")]
    Lookup { secret_id: String, reason: String },

    /// The secret was retrieved but did not contain a usable `apiKey`.
    #[error("Secret {secret_id} is malformed: {reason}")]
    Malformed { secret_id: String, reason: String },
}
