use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::QuoteOutcome;
use super::wire::{ERROR_MESSAGE, GLOBAL_QUOTE, GlobalQuoteNode, INFORMATION, NOTE};
use crate::core::{Quote, Symbol};

/// Translate one provider answer into a [`QuoteOutcome`].
///
/// Precedence: explicit error indicator, then rate-limit indicator, then a usable price on a
/// 2xx answer. Everything else is a transient fault.
pub(crate) fn classify(
    symbol: &Symbol,
    status: u16,
    body: &str,
    received_at: DateTime<Utc>,
) -> QuoteOutcome {
    // Indicators count by presence alone, whatever their value looks like.
    let doc: Option<Value> = serde_json::from_str(body).ok();
    let top = doc.as_ref().and_then(Value::as_object);

    if let Some(top) = top {
        if top.contains_key(ERROR_MESSAGE) {
            return QuoteOutcome::NotFound(symbol.clone());
        }
        if top.contains_key(NOTE) || top.contains_key(INFORMATION) {
            return QuoteOutcome::RateLimited;
        }
    }

    if !(200..300).contains(&status) {
        return QuoteOutcome::TransientFault(format!("provider returned status {status}"));
    }

    let Some(top) = top else {
        return QuoteOutcome::TransientFault("provider response is not a JSON object".into());
    };
    let Some(raw) = top.get(GLOBAL_QUOTE) else {
        return QuoteOutcome::TransientFault("provider response has no quote".into());
    };
    let Ok(node) = GlobalQuoteNode::deserialize(raw) else {
        return QuoteOutcome::TransientFault("provider quote has an unexpected shape".into());
    };

    let price = node
        .price
        .as_deref()
        .map(str::trim)
        .and_then(|p| Decimal::from_str(p).ok());
    match price {
        Some(price) if price > Decimal::ZERO => QuoteOutcome::Success(Quote {
            symbol: symbol.clone(),
            price,
            previous_close: node
                .previous_close
                .as_deref()
                .and_then(|p| Decimal::from_str(p.trim()).ok()),
            latest_trading_day: node
                .latest_trading_day
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok()),
            as_of: received_at,
        }),
        Some(_) => QuoteOutcome::TransientFault("provider returned a non-positive price".into()),
        None => QuoteOutcome::TransientFault("provider response has no usable price".into()),
    }
}
