//! Quotation totals calculator.
//!
//! The one cross-field invariant in the system lives here:
//! `total = subtotal + tax_amount - discount`, where
//! `subtotal = Σ(quantity × unit_price)` and `tax_amount = subtotal × rate`.
//! Totals are recomputed from the line items on every save; whatever a client
//! sends for the derived fields is ignored.

use rust_decimal::Decimal;

use crate::model::quotation::QuotationItem;
use crate::util::money::{apply_percent, round_money};

/// Derived totals for a set of line items.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotationTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Line total for a single item: `quantity × unit_price`.
pub fn line_total(quantity: u32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

/// Computes subtotal, tax and grand total from line items.
///
/// `tax_rate_percent` is a percentage (18 = 18%). An empty item list yields a
/// zero subtotal and a total of `-discount`; negative totals are representable
/// and not rejected here. Input bounds are a DTO concern: the API boundary
/// caps quantity at 1e6, unit price and discount at 1e9, and item count at
/// 200, so every reachable subtotal stays below 2e17 and the arithmetic here
/// cannot overflow `Decimal`.
pub fn compute_totals(
    items: &[QuotationItem],
    tax_rate_percent: Decimal,
    discount: Decimal,
) -> QuotationTotals {
    let subtotal: Decimal = items
        .iter()
        .map(|item| line_total(item.quantity, item.unit_price))
        .sum();
    let subtotal = round_money(subtotal);
    let tax_amount = apply_percent(subtotal, tax_rate_percent);
    let discount = round_money(discount);
    let total = round_money(subtotal + tax_amount - discount);
    QuotationTotals {
        subtotal,
        tax_amount,
        discount,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(quantity: u32, unit_price: &str) -> QuotationItem {
        QuotationItem {
            description: "test item".to_string(),
            quantity,
            unit_price: dec(unit_price),
            line_total: line_total(quantity, dec(unit_price)),
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(3, dec("2.99")), dec("8.97"));
        assert_eq!(line_total(1, dec("5000")), dec("5000"));
    }

    #[test]
    fn test_sample_data_example() {
        // Matches the worked example in the sample data:
        // 5000 + 1500 at 18% => 6500 subtotal, 1170 tax, 7670 total.
        let items = vec![item(1, "5000"), item(1, "1500")];
        let totals = compute_totals(&items, dec("18"), Decimal::ZERO);
        assert_eq!(totals.subtotal, dec("6500"));
        assert_eq!(totals.tax_amount, dec("1170"));
        assert_eq!(totals.total, dec("7670"));
    }

    #[test]
    fn test_discount_example() {
        // 8000 at 18% minus 500 discount => 8940.
        let items = vec![item(1, "8000")];
        let totals = compute_totals(&items, dec("18"), dec("500"));
        assert_eq!(totals.subtotal, dec("8000"));
        assert_eq!(totals.tax_amount, dec("1440"));
        assert_eq!(totals.total, dec("8940"));
    }

    #[test]
    fn test_empty_items_yield_negative_discount() {
        let totals = compute_totals(&[], dec("18"), dec("250"));
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total, dec("-250"));
    }

    #[test]
    fn test_tax_rounding_half_up() {
        // 99.99 at 8.25% = 8.249175 => 8.25
        let items = vec![item(1, "99.99")];
        let totals = compute_totals(&items, dec("8.25"), Decimal::ZERO);
        assert_eq!(totals.tax_amount, dec("8.25"));
        assert_eq!(totals.total, dec("108.24"));
    }

    #[test]
    fn test_largest_boundary_accepted_quotation() {
        // 200 items at the DTO caps (qty 1e6, price 1e9) is the largest
        // quotation the API admits; it must compute, not overflow.
        let items: Vec<QuotationItem> = (0..200).map(|_| item(1_000_000, "1000000000")).collect();
        let totals = compute_totals(&items, dec("100"), Decimal::ZERO);
        assert_eq!(totals.subtotal, dec("200000000000000000"));
        assert_eq!(totals.total, totals.subtotal + totals.tax_amount);
    }

    #[test]
    fn test_quantity_multiplies() {
        let items = vec![item(4, "12.50"), item(2, "3.25")];
        let totals = compute_totals(&items, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.subtotal, dec("56.50"));
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total, dec("56.50"));
    }
}
