use serde::Deserialize;

// Wire model for `function=GLOBAL_QUOTE`. The provider signals problems with informal
// top-level keys instead of status codes; their values carry no fixed shape.

/// Unknown symbol or malformed call.
pub(crate) const ERROR_MESSAGE: &str = "Error Message";
/// Per-minute frequency notice.
pub(crate) const NOTE: &str = "Note";
/// Daily quota notice.
pub(crate) const INFORMATION: &str = "Information";
pub(crate) const GLOBAL_QUOTE: &str = "Global Quote";

#[derive(Deserialize)]
pub(crate) struct GlobalQuoteNode {
    #[serde(rename = "05. price")]
    pub(crate) price: Option<String>,
    #[serde(rename = "07. latest trading day")]
    pub(crate) latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close")]
    pub(crate) previous_close: Option<String>,
}
