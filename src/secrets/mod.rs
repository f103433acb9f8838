//! Secret stores that can hand back the provider credential document.
//!
//! A source returns the raw secret string (a JSON document such as `{"apiKey":"..."}`).
//! Parsing and caching happen in [`CredentialProvider`](crate::CredentialProvider).

use std::fmt;

use futures::future::BoxFuture;
use serde::Deserialize;
use url::Url;

use crate::core::CredentialError;

/// Header the Parameters and Secrets extension uses to authenticate local callers.
const EXTENSION_TOKEN_HEADER: &str = "X-Aws-Parameters-Secrets-Token";

/// Anything that can look up a secret document by identifier.
pub trait SecretSource: Send + Sync + fmt::Debug {
    /// Fetch the raw secret string stored under `secret_id`.
    fn fetch_secret<'a>(&'a self, secret_id: &'a str)
    -> BoxFuture<'a, Result<String, CredentialError>>;
}

/* ----------------------- Lambda extension ----------------------- */

#[derive(Deserialize)]
struct ExtensionEnvelope {
    #[serde(rename = "SecretString")]
    secret_string: Option<String>,
}

/// Reads secrets through the Lambda "Parameters and Secrets" extension's local HTTP API.
#[derive(Clone)]
pub struct ExtensionSecretSource {
    http: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
}

impl fmt::Debug for ExtensionSecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionSecretSource")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl ExtensionSecretSource {
    /// `endpoint` is the extension's origin, e.g. `http://localhost:2773`.
    pub fn new(http: reqwest::Client, endpoint: Url) -> Self {
        Self {
            http,
            endpoint,
            token: None,
        }
    }

    /// Session token sent in the extension's auth header.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Use `AWS_SESSION_TOKEN` from the function environment, if present.
    #[must_use]
    pub fn with_env_token(self) -> Self {
        match std::env::var("AWS_SESSION_TOKEN") {
            Ok(token) if !token.is_empty() => self.with_token(token),
            _ => self,
        }
    }

    fn lookup_url(&self, secret_id: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.set_path("/secretsmanager/get");
        url.set_query(None);
        url.query_pairs_mut().append_pair("secretId", secret_id);
        url
    }
}

impl SecretSource for ExtensionSecretSource {
    fn fetch_secret<'a>(
        &'a self,
        secret_id: &'a str,
    ) -> BoxFuture<'a, Result<String, CredentialError>> {
        Box::pin(async move {
            let lookup = |reason: String| CredentialError::Lookup {
                secret_id: secret_id.to_string(),
                reason,
            };

            let mut req = self
                .http
                .get(self.lookup_url(secret_id))
                .header("accept", "application/json");
            if let Some(token) = &self.token {
                req = req.header(EXTENSION_TOKEN_HEADER, token);
            }

            let resp = req
                .send()
                .await
                .map_err(|e| lookup(e.without_url().to_string()))?;
            let status = resp.status();
            let body = resp
                .text()
                .await
                .map_err(|e| lookup(e.without_url().to_string()))?;

            if !status.is_success() {
                return Err(lookup(format!(
                    "secret store returned status {}",
                    status.as_u16()
                )));
            }

            let env: ExtensionEnvelope =
                serde_json::from_str(&body).map_err(|_| CredentialError::Malformed {
                    secret_id: secret_id.to_string(),
                    reason: "secret store response is not JSON".into(),
                })?;

            env.secret_string.ok_or_else(|| CredentialError::Malformed {
                secret_id: secret_id.to_string(),
                reason: "secret has no SecretString".into(),
            })
        })
    }
}

/* ----------------------- Environment ----------------------- */

/// Reads the secret document from an environment variable. Handy for local runs.
#[derive(Debug, Clone)]
pub struct EnvSecretSource {
    var: String,
}

impl EnvSecretSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SecretSource for EnvSecretSource {
    fn fetch_secret<'a>(
        &'a self,
        secret_id: &'a str,
    ) -> BoxFuture<'a, Result<String, CredentialError>> {
        let result = std::env::var(&self.var).map_err(|_| CredentialError::Lookup {
            secret_id: secret_id.to_string(),
            reason: format!("environment variable {} is not set", self.var),
        });
        Box::pin(async move { result })
    }
}

/* ----------------------- Static ----------------------- */

/// A fixed secret document.
#[derive(Clone)]
pub struct StaticSecretSource {
    secret: String,
}

impl fmt::Debug for StaticSecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticSecretSource(***)")
    }
}

impl StaticSecretSource {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Wrap a bare API key in the `{"apiKey": ...}` document the provider expects.
    pub fn api_key(key: &str) -> Self {
        Self::new(serde_json::json!({ "apiKey": key }).to_string())
    }
}

impl SecretSource for StaticSecretSource {
    fn fetch_secret<'a>(
        &'a self,
        _secret_id: &'a str,
    ) -> BoxFuture<'a, Result<String, CredentialError>> {
        let secret = self.secret.clone();
        Box::pin(async move { Ok(secret) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_lookup_url_replaces_path_and_query() {
        let src = ExtensionSecretSource::new(
            reqwest::Client::new(),
            Url::parse("http://localhost:2773/ignored?x=1").unwrap(),
        );
        assert_eq!(
            src.lookup_url("prod/alpha vantage").as_str(),
            "http://localhost:2773/secretsmanager/get?secretId=prod%2Falpha+vantage"
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let src = StaticSecretSource::api_key("super-secret");
        assert!(!format!("{src:?}").contains("super-secret"));

        let ext = ExtensionSecretSource::new(
            reqwest::Client::new(),
            Url::parse("http://localhost:2773").unwrap(),
        )
        .with_token("session-token");
        assert!(!format!("{ext:?}").contains("session-token"));
    }

    #[tokio::test]
    async fn missing_env_var_is_a_lookup_error() {
        let src = EnvSecretSource::new("QR_TEST_SECRET_THAT_IS_NEVER_SET");
        let err = src.fetch_secret("id").await.unwrap_err();
        assert!(matches!(err, CredentialError::Lookup { .. }));
    }
}
