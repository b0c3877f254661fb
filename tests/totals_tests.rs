use qms_backend::model::quotation::QuotationItem;
use qms_backend::util::numbering::{format_number, initials};
use qms_backend::util::totals::{compute_totals, line_total};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn item(description: &str, quantity: u32, unit_price: &str) -> QuotationItem {
    let unit_price = dec(unit_price);
    QuotationItem {
        description: description.to_string(),
        quantity,
        unit_price,
        line_total: line_total(quantity, unit_price),
    }
}

#[test]
fn test_totals_for_typical_quotation() {
    // Website redesign: 5000 + 1500 at 18% tax.
    let items = vec![
        item("Website redesign", 1, "5000"),
        item("Hosting setup", 1, "1500"),
    ];
    let totals = compute_totals(&items, dec("18"), Decimal::ZERO);
    assert_eq!(totals.subtotal, dec("6500"));
    assert_eq!(totals.tax_amount, dec("1170"));
    assert_eq!(totals.discount, Decimal::ZERO);
    assert_eq!(totals.total, dec("7670"));
}

#[test]
fn test_totals_with_discount() {
    let items = vec![item("Mobile app prototype", 1, "8000")];
    let totals = compute_totals(&items, dec("18"), dec("500"));
    assert_eq!(totals.subtotal, dec("8000"));
    assert_eq!(totals.tax_amount, dec("1440"));
    assert_eq!(totals.total, dec("8940"));
}

#[test]
fn test_totals_invariant_holds() {
    let items = vec![
        item("Consulting", 3, "149.99"),
        item("Travel", 2, "75.50"),
        item("Support retainer", 12, "19.95"),
    ];
    let totals = compute_totals(&items, dec("8.25"), dec("25"));
    assert_eq!(
        totals.total,
        totals.subtotal + totals.tax_amount - totals.discount
    );
    // Money is stored with at most two decimal places.
    assert!(totals.total.scale() <= 2);
    assert!(totals.tax_amount.scale() <= 2);
}

#[test]
fn test_zero_tax_rate() {
    let items = vec![item("Workshop", 2, "400")];
    let totals = compute_totals(&items, Decimal::ZERO, Decimal::ZERO);
    assert_eq!(totals.tax_amount, Decimal::ZERO);
    assert_eq!(totals.total, dec("800"));
}

#[test]
fn test_quotation_number_shape() {
    let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
    let number = format_number(&initials("Mohamed Frihaoui", "mf@example.com"), date, 1);
    assert_eq!(number, "MF29082026-01");

    // New day, new sequence; same day increments.
    let next = format_number("MF", date, 2);
    assert_eq!(next, "MF29082026-02");
}

#[test]
fn test_quotation_number_survives_odd_names() {
    let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    assert_eq!(format_number(&initials("admin", "a@b.c"), date, 9), "AD02012026-09");
    assert_eq!(format_number(&initials("", "sales@corp.io"), date, 10), "SA02012026-10");
    assert_eq!(format_number(&initials("", ""), date, 99), "XX02012026-99");
}
