//! The request pipeline: validate, fetch, compute, format.
//!
//! A [`Handler`] never fails. Every error becomes an [`ApiResponse`] with `success: false`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::core::{QrError, QuoteClient, QuoteClientBuilder, ReturnResult};
use crate::response::{self, ApiResponse};
use crate::returns;
use crate::validate::validate;

/// Subset of the gateway proxy event this handler reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Raw caller parameters plus a correlation id for logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteRequest {
    pub symbol: Option<String>,
    pub initial_price: Option<String>,
    pub request_id: String,
}

impl QuoteRequest {
    pub fn new(
        symbol: Option<&str>,
        initial_price: Option<&str>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.map(str::to_string),
            initial_price: initial_price.map(str::to_string),
            request_id: request_id.into(),
        }
    }
}

impl From<GatewayEvent> for QuoteRequest {
    fn from(event: GatewayEvent) -> Self {
        let mut params = event.query_string_parameters.unwrap_or_default();
        Self {
            symbol: params.remove("symbol"),
            initial_price: params.remove("initialPrice"),
            request_id: event
                .request_context
                .and_then(|c| c.request_id)
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

/// Runs one request at a time against a shared [`QuoteClient`].
#[derive(Debug, Clone)]
pub struct Handler {
    client: QuoteClient,
}

impl Handler {
    pub fn new(client: QuoteClient) -> Self {
        Self { client }
    }

    /// Build the client from `QR_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds an unusable URL or timeout.
    pub fn from_env() -> Result<Self, QrError> {
        Ok(Self::new(QuoteClientBuilder::from_env()?.build()?))
    }

    pub fn client(&self) -> &QuoteClient {
        &self.client
    }

    /// Decode a gateway event and handle it.
    pub async fn handle_event(&self, event: GatewayEvent) -> ApiResponse {
        self.handle(&QuoteRequest::from(event)).await
    }

    /// Run the full pipeline for one request.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(request_id = %req.request_id))
    )]
    pub async fn handle(&self, req: &QuoteRequest) -> ApiResponse {
        #[cfg(feature = "tracing")]
        tracing::info!(
            symbol = req.symbol.as_deref().unwrap_or(""),
            initial_price = req.initial_price.as_deref().unwrap_or(""),
            "request received"
        );

        let result = self.run(req).await;

        #[cfg(feature = "tracing")]
        {
            match &result {
                Ok(r) => tracing::info!(
                    symbol = %r.symbol,
                    percentage_return = %r.percentage_return,
                    is_profit = r.is_profit,
                    "request completed"
                ),
                Err(e) => tracing::warn!(
                    status = response::status_for(e),
                    error = %e,
                    "request failed"
                ),
            }
        }

        response::format(&result)
    }

    async fn run(&self, req: &QuoteRequest) -> Result<ReturnResult, QrError> {
        let valid = validate(req.symbol.as_deref(), req.initial_price.as_deref())?;
        let quote = self.client.fetch_quote(&valid.symbol).await.into_result()?;
        Ok(returns::compute(valid.symbol, valid.initial_price, quote.price))
    }
}
