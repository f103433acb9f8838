use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::error::ValidationError;

const MAX_SYMBOL_LEN: usize = 5;

/* ----- SYMBOL ----- */

/// A normalized ticker: 1 to 5 uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trim, uppercase and check the `^[A-Z]{1,5}$` shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSymbolFormat`] when the normalized text does not match.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_uppercase();
        let len = normalized.len();
        if len == 0 || len > MAX_SYMBOL_LEN || !normalized.bytes().all(|b| b.is_ascii_uppercase())
        {
            return Err(ValidationError::InvalidSymbolFormat);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/* ----- REFERENCE PRICE ----- */

/// A strictly positive price supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ReferencePrice(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl ReferencePrice {
    /// Parse plain (`"150.25"`) or scientific (`"1.5e2"`) decimal text.
    ///
    /// The text must be a finite number first; it is then held exactly as a [`Decimal`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPrice`] for text that is not a number, is not above
    /// zero, or lies outside the range a [`Decimal`] holds (above about 7.9e28, or so small
    /// it rounds to zero at 28 decimal places).
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let text = input.trim();
        if text.contains('_') {
            return Err(ValidationError::InvalidPrice);
        }
        let approx = f64::from_str(text).map_err(|_| ValidationError::InvalidPrice)?;
        if !approx.is_finite() || approx <= 0.0 {
            return Err(ValidationError::InvalidPrice);
        }
        let value = Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|_| ValidationError::InvalidPrice)?;
        Self::new(value)
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPrice`] unless `value > 0`.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidPrice)
        }
    }

    pub const fn value(self) -> Decimal {
        self.0
    }
}

/* ----- QUOTE ----- */

/// A live price observed at the provider for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: Symbol,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub previous_close: Option<Decimal>,
    pub latest_trading_day: Option<NaiveDate>,
    /// When this process received the quote.
    pub as_of: DateTime<Utc>,
}

/* ----- RETURN RESULT ----- */

/// The derived return of holding `symbol` from `initial_price` to `current_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnResult {
    pub symbol: Symbol,
    #[serde(with = "rust_decimal::serde::float")]
    pub initial_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage_return: Decimal,
    pub is_profit: bool,
}
