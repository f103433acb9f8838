//! Caller input checks. Rules run in order and the first violation is reported.

use crate::core::{ReferencePrice, Symbol, ValidationError};

/// Inputs that passed validation, ready for the quote fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub symbol: Symbol,
    pub initial_price: ReferencePrice,
}

/// Check presence, then the symbol shape, then the price.
///
/// # Errors
///
/// - [`ValidationError::MissingParameters`] if either value is absent or blank.
/// - [`ValidationError::InvalidSymbolFormat`] if the symbol is not 1-5 letters.
/// - [`ValidationError::InvalidPrice`] if the price is not a number above zero.
pub fn validate(
    raw_symbol: Option<&str>,
    raw_price: Option<&str>,
) -> Result<ValidatedRequest, ValidationError> {
    let (Some(raw_symbol), Some(raw_price)) = (non_blank(raw_symbol), non_blank(raw_price)) else {
        return Err(ValidationError::MissingParameters);
    };

    let symbol = Symbol::parse(raw_symbol)?;
    let initial_price = ReferencePrice::parse(raw_price)?;

    Ok(ValidatedRequest {
        symbol,
        initial_price,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
