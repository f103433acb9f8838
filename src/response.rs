//! Turning a pipeline result into the gateway's proxy response shape.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::{QrError, ReturnResult};

/// A gateway proxy response: status, headers and a JSON-encoded body string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    fn json(status_code: u16, body: String) -> Self {
        let headers = BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ]);
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Parse the body back into JSON.
    ///
    /// # Errors
    ///
    /// Fails only if the body was not produced by this module.
    pub fn json_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[derive(Serialize)]
struct SuccessBody<'a> {
    success: bool,
    data: &'a ReturnResult,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

/// HTTP status for a failed pipeline.
pub fn status_for(err: &QrError) -> u16 {
    match err {
        QrError::Validation(_) => 400,
        QrError::NotFound { .. } => 404,
        QrError::RateLimited => 429,
        QrError::Transient(_)
        | QrError::Fatal(_)
        | QrError::Http(_)
        | QrError::Url(_)
        | QrError::Config(_) => 500,
    }
}

/// Successful result: 200 with `{success: true, data}`.
pub fn success(result: &ReturnResult) -> ApiResponse {
    let body = serde_json::to_string(&SuccessBody {
        success: true,
        data: result,
    });
    match body {
        Ok(body) => ApiResponse::json(200, body),
        Err(e) => failure(&QrError::Transient(format!("failed to encode response: {e}"))),
    }
}

/// Failed result: the mapped status with `{success: false, error}`.
pub fn failure(err: &QrError) -> ApiResponse {
    let message = err.to_string();
    let body = serde_json::to_string(&ErrorBody {
        success: false,
        error: &message,
    })
    .unwrap_or_else(|_| r#"{"success":false,"error":"Internal server error"}"#.to_string());
    ApiResponse::json(status_for(err), body)
}

/// Map the terminal state of a pipeline run.
pub fn format(result: &Result<ReturnResult, QrError>) -> ApiResponse {
    match result {
        Ok(r) => success(r),
        Err(e) => failure(e),
    }
}
