use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{ReferencePrice, ReturnResult, Symbol};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Percentage return from `initial` to `current`, rounded to 2 places half away from zero.
///
/// A flat return counts as a profit. Results that overflow decimal range saturate.
pub fn compute(symbol: Symbol, initial: ReferencePrice, current: Decimal) -> ReturnResult {
    let initial_price = initial.value();
    let change = current.saturating_sub(initial_price);
    let ratio = change.checked_div(initial_price).unwrap_or(if change.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    });
    let mut percentage_return = ratio
        .saturating_mul(HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Tiny losses round to a negative zero.
    if percentage_return.is_zero() {
        percentage_return = Decimal::ZERO;
    }

    ReturnResult {
        symbol,
        initial_price,
        current_price: current,
        percentage_return,
        is_profit: percentage_return >= Decimal::ZERO,
    }
}
