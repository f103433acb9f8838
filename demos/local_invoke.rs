//! Run the handler once from the command line.
//!
//! ```text
//! QR_SECRET_ENV=AV_SECRET AV_SECRET='{"apiKey":"demo"}' \
//!   cargo run --example local_invoke --features tracing-subscriber -- IBM 150.00
//! ```

use quote_returns::{Handler, QuoteRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    quote_returns::logging::init_tracing();

    let mut args = std::env::args().skip(1);
    let symbol = args.next();
    let price = args.next();

    let handler = Handler::from_env()?;
    let request = QuoteRequest::new(symbol.as_deref(), price.as_deref(), "local-1");
    let resp = handler.handle(&request).await;

    println!("status: {}", resp.status_code);
    println!("{}", serde_json::to_string_pretty(&resp.json_body()?)?);
    Ok(())
}
