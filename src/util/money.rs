//! Monetary value helpers.
//!
//! Every monetary amount in the system is a `rust_decimal::Decimal` rounded to
//! two decimal places at the point of persistence. Rounding is half-up
//! (`MidpointAwayFromZero`), matching how the totals in the sample data were
//! produced. Floats only exist at the API edge; see the DTO layer.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to two decimal places, half-up.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a percentage rate (18 = 18%) to an amount and rounds the result.
pub fn apply_percent(amount: Decimal, rate_percent: Decimal) -> Decimal {
    round_money(amount * rate_percent / Decimal::from(100))
}

/// Converts an API-edge float into a `Decimal`, rejecting NaN/infinity.
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    Decimal::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec("0.825")), dec("0.83"));
        assert_eq!(round_money(dec("0.824")), dec("0.82"));
        assert_eq!(round_money(dec("-0.825")), dec("-0.83"));
    }

    #[test]
    fn test_round_money_idempotent() {
        let already = dec("10.99");
        assert_eq!(round_money(already), already);
    }

    #[test]
    fn test_apply_percent() {
        assert_eq!(apply_percent(dec("6500"), dec("18")), dec("1170.00"));
        assert_eq!(apply_percent(dec("1000"), dec("8.25")), dec("82.50"));
    }

    #[test]
    fn test_decimal_from_f64_rejects_non_finite() {
        assert!(decimal_from_f64(f64::NAN).is_none());
        assert!(decimal_from_f64(f64::INFINITY).is_none());
        assert!(decimal_from_f64(1500.0).is_some());
    }
}
