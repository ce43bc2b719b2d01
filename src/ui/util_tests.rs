#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_fits() {
    assert_eq!(truncate("Coffee", 10), "Coffee");
    assert_eq!(truncate("Coffee", 6), "Coffee");
}

#[test]
fn test_truncate_long_description() {
    assert_eq!(truncate("Monthly rent payment", 8), "Monthly…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Coffee", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_pads_cents() {
    assert_eq!(format_amount(dec!(5.5)), "$5.50");
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative_balance() {
    assert_eq!(format_amount(dec!(-50)), "-$50.00");
}

#[test]
fn test_format_amount_rounds() {
    assert_eq!(format_amount(dec!(133.3333)), "$133.33");
}

// ── format_date / capitalize ──────────────────────────────────

#[test]
fn test_format_date() {
    let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    assert_eq!(format_date(d), "Jan 5, 2024");
}

#[test]
fn test_capitalize() {
    assert_eq!(capitalize("income"), "Income");
    assert_eq!(capitalize("Expense"), "Expense");
    assert_eq!(capitalize(""), "");
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar_partial() {
    assert_eq!(progress_bar(dec!(50), 10), "[█████░░░░░]");
}

#[test]
fn test_progress_bar_empty() {
    assert_eq!(progress_bar(dec!(0), 4), "[░░░░]");
}

#[test]
fn test_progress_bar_clamps_over_budget() {
    assert_eq!(progress_bar(dec!(150), 4), "[████]");
    assert_eq!(progress_bar(dec!(-10), 4), "[░░░░]");
}
