/// Raw answer from one provider round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

/// Send the request and read the body as text.
///
/// Transport failures are rendered without the request URL, which carries the API key.
pub(crate) async fn get_text(req: reqwest::RequestBuilder) -> Result<RawResponse, String> {
    let resp = req.send().await.map_err(describe_send_error)?;
    let status = resp.status().as_u16();
    let body = resp
        .text()
        .await
        .map_err(|e| format!("failed to read provider response: {}", e.without_url()))?;
    Ok(RawResponse { status, body })
}

fn describe_send_error(e: reqwest::Error) -> String {
    if e.is_timeout() {
        format!("provider request timed out: {}", e.without_url())
    } else if e.is_connect() {
        format!("provider connection failed: {}", e.without_url())
    } else {
        format!("provider request failed: {}", e.without_url())
    }
}
