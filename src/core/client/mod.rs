//! Public client surface + builder.
//! Internals are split into `auth` (credential cache), `constants` (UA + defaults) and
//! `retry` (backoff policy).

mod auth;
mod constants;
pub mod retry;

pub use auth::{Credential, CredentialProvider};
pub use retry::{Backoff, RetryConfig};

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::core::QrError;
use crate::quote::observer::{AttemptObserver, TracingObserver};
use crate::secrets::{EnvSecretSource, ExtensionSecretSource, SecretSource, StaticSecretSource};
use constants::{
    DEFAULT_BASE_QUERY, DEFAULT_SECRET_ID, DEFAULT_SECRETS_ENDPOINT, DEFAULT_TIMEOUT_SECS,
    ENV_API_BASE, ENV_SECRET_ENV, ENV_SECRET_ID, ENV_SECRETS_ENDPOINT, ENV_TIMEOUT_SECS,
    USER_AGENT,
};

/// Holds the HTTP pool, provider endpoint, retry policy and the shared credential cache.
///
/// Cloning is cheap and clones share the credential cache, so a host should build one
/// client per process and hand clones to concurrent invocations.
#[derive(Clone)]
pub struct QuoteClient {
    http: Client,
    base_query: Url,
    timeout: Duration,
    retry: RetryConfig,
    credentials: Arc<CredentialProvider>,
    observer: Arc<dyn AttemptObserver>,
}

impl std::fmt::Debug for QuoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteClient")
            .field("base_query", &self.base_query.as_str())
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl QuoteClient {
    /// Create a new builder.
    pub fn builder() -> QuoteClientBuilder {
        QuoteClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_query(&self) -> &Url {
        &self.base_query
    }
    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }
    pub(crate) fn observer(&self) -> &dyn AttemptObserver {
        self.observer.as_ref()
    }

    /// The retry policy applied to every quote fetch.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// The credential cache shared by this client and its clones.
    pub fn credentials(&self) -> &Arc<CredentialProvider> {
        &self.credentials
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct QuoteClientBuilder {
    user_agent: Option<String>,
    base_query: Option<Url>,
    secrets_endpoint: Option<Url>,
    secret_id: Option<String>,
    secret_source: Option<Arc<dyn SecretSource>>,
    credentials: Option<Arc<CredentialProvider>>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
    observer: Option<Arc<dyn AttemptObserver>>,
}

impl QuoteClientBuilder {
    /// Start from the process environment.
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `QR_API_BASE` | provider query URL |
    /// | `QR_SECRET_ID` | secret identifier holding `{"apiKey": ...}` |
    /// | `QR_SECRETS_ENDPOINT` | origin of the secrets extension |
    /// | `QR_SECRET_ENV` | read the secret document from this variable instead |
    /// | `QR_TIMEOUT_SECS` | per-attempt provider timeout |
    ///
    /// # Errors
    ///
    /// Returns an error if a URL or the timeout cannot be parsed.
    pub fn from_env() -> Result<Self, QrError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with `lookup` standing in for the environment.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, QrError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut builder = Self::default();

        if let Some(base) = var(ENV_API_BASE) {
            builder = builder.base_query(Url::parse(&base)?);
        }
        if let Some(id) = var(ENV_SECRET_ID) {
            builder = builder.secret_id(id);
        }
        if let Some(endpoint) = var(ENV_SECRETS_ENDPOINT) {
            builder = builder.secrets_endpoint(Url::parse(&endpoint)?);
        }
        if let Some(name) = var(ENV_SECRET_ENV) {
            builder = builder.secret_source(Arc::new(EnvSecretSource::new(name)));
        }
        if let Some(secs) = var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| QrError::Config(format!("{ENV_TIMEOUT_SECS} must be whole seconds")))?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(builder)
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the provider query URL (e.g., `https://www.alphavantage.co/query`).
    #[must_use]
    pub fn base_query(mut self, url: Url) -> Self {
        self.base_query = Some(url);
        self
    }

    /// Override the origin of the secrets extension (e.g., `http://localhost:2773`).
    #[must_use]
    pub fn secrets_endpoint(mut self, url: Url) -> Self {
        self.secrets_endpoint = Some(url);
        self
    }

    /// Identifier of the secret holding the provider key.
    #[must_use]
    pub fn secret_id(mut self, id: impl Into<String>) -> Self {
        self.secret_id = Some(id.into());
        self
    }

    /// Look the secret up somewhere other than the secrets extension.
    #[must_use]
    pub fn secret_source(mut self, source: Arc<dyn SecretSource>) -> Self {
        self.secret_source = Some(source);
        self
    }

    /// Use a fixed API key and skip the secret store entirely.
    #[must_use]
    pub fn api_key(self, key: &str) -> Self {
        self.secret_source(Arc::new(StaticSecretSource::api_key(key)))
    }

    /// Share an existing credential cache instead of creating a new one.
    /// Takes precedence over `secret_source`, `secret_id` and `secrets_endpoint`.
    #[must_use]
    pub fn credentials(mut self, provider: Arc<CredentialProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// Per-attempt provider timeout. Default: 10 seconds.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Toggle retries while keeping the rest of the policy.
    #[must_use]
    pub fn retry_enabled(mut self, enabled: bool) -> Self {
        let mut cfg = self.retry.take().unwrap_or_default();
        cfg.enabled = enabled;
        self.retry = Some(cfg);
        self
    }

    /// Receive a record after every provider attempt. Default: [`TracingObserver`].
    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn AttemptObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// # Errors
    ///
    /// Returns an error if a default URL fails to parse or the HTTP client cannot be built.
    pub fn build(self) -> Result<QuoteClient, QrError> {
        let base_query = match self.base_query {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_QUERY)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }
        let http = httpb.build()?;

        let credentials = match self.credentials {
            Some(p) => p,
            None => {
                let source: Arc<dyn SecretSource> = match self.secret_source {
                    Some(s) => s,
                    None => {
                        let endpoint = match self.secrets_endpoint {
                            Some(u) => u,
                            None => Url::parse(DEFAULT_SECRETS_ENDPOINT)?,
                        };
                        Arc::new(ExtensionSecretSource::new(http.clone(), endpoint).with_env_token())
                    }
                };
                let secret_id = self
                    .secret_id
                    .unwrap_or_else(|| DEFAULT_SECRET_ID.to_string());
                Arc::new(CredentialProvider::new(source, secret_id))
            }
        };

        Ok(QuoteClient {
            http,
            base_query,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            retry: self.retry.unwrap_or_default(),
            credentials,
            observer: self.observer.unwrap_or_else(|| Arc::new(TracingObserver)),
        })
    }
}
