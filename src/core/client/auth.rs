//! Provider API key acquisition and the process-lifetime credential cache.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};

use crate::core::error::CredentialError;
use crate::secrets::SecretSource;

/// The provider API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Arc<str>);

impl Credential {
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Deserialize)]
struct SecretDocument {
    #[serde(rename = "apiKey")]
    api_key: Option<String>,
}

fn parse_secret(secret_id: &str, raw: &str) -> Result<Credential, CredentialError> {
    let malformed = |reason: &str| CredentialError::Malformed {
        secret_id: secret_id.to_string(),
        reason: reason.to_string(),
    };

    let doc: SecretDocument = serde_json::from_str(raw)
        .map_err(|_| malformed("secret is not a JSON object with an apiKey string"))?;
    match doc.api_key {
        Some(key) if !key.trim().is_empty() => Ok(Credential(Arc::from(key.trim()))),
        Some(_) => Err(malformed("apiKey is empty")),
        None => Err(malformed("apiKey is missing")),
    }
}

/// Resolves the provider credential once and keeps it for the lifetime of the provider.
///
/// The first caller performs the lookup while holding a dedicated fetch lock; callers that
/// arrive meanwhile wait on that lock and then read the stored outcome. The outcome is kept
/// whether it is a key or an error, so at most one lookup ever reaches the secret store.
pub struct CredentialProvider {
    source: Arc<dyn SecretSource>,
    secret_id: String,
    state: RwLock<Option<Result<Credential, CredentialError>>>,
    fetch_lock: Mutex<()>,
}

impl fmt::Debug for CredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialProvider")
            .field("source", &self.source)
            .field("secret_id", &self.secret_id)
            .finish_non_exhaustive()
    }
}

impl CredentialProvider {
    pub fn new(source: Arc<dyn SecretSource>, secret_id: impl Into<String>) -> Self {
        Self {
            source,
            secret_id: secret_id.into(),
            state: RwLock::new(None),
            fetch_lock: Mutex::new(()),
        }
    }

    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    /// Return the cached credential, resolving it on first use.
    ///
    /// # Errors
    ///
    /// Returns the [`CredentialError`] of the single lookup if that lookup failed.
    pub async fn get_credential(&self) -> Result<Credential, CredentialError> {
        // Fast path: already resolved.
        if let Some(resolved) = self.state.read().await.as_ref() {
            return resolved.clone();
        }

        let _guard = self.fetch_lock.lock().await;

        // Another task may have resolved it while this one waited.
        if let Some(resolved) = self.state.read().await.as_ref() {
            return resolved.clone();
        }

        #[cfg(feature = "tracing")]
        tracing::info!(secret_id = %self.secret_id, "resolving provider credential");

        let resolved = match self.source.fetch_secret(&self.secret_id).await {
            Ok(raw) => parse_secret(&self.secret_id, &raw),
            Err(e) => Err(e),
        };

        #[cfg(feature = "tracing")]
        {
            if let Err(e) = &resolved {
                tracing::error!(error = %e, "credential lookup failed");
            }
        }

        *self.state.write().await = Some(resolved.clone());
        resolved
    }
}

impl super::QuoteClient {
    pub(crate) async fn credential(&self) -> Result<Credential, CredentialError> {
        self.credentials.get_credential().await
    }
}
