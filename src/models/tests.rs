#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::ValidationError;

fn draft(kind: &str, amount: &str, category: &str, date: &str) -> TransactionDraft {
    TransactionDraft {
        kind: kind.into(),
        amount: amount.into(),
        description: "Lunch".into(),
        category: category.into(),
        date: date.into(),
    }
}

// ── TransactionType ───────────────────────────────────────────

#[test]
fn test_transaction_type_parse() {
    assert_eq!(TransactionType::parse("income"), Some(TransactionType::Income));
    assert_eq!(TransactionType::parse("INCOME"), Some(TransactionType::Income));
    assert_eq!(TransactionType::parse(" Expense "), Some(TransactionType::Expense));
    assert_eq!(TransactionType::parse("transfer"), None);
    assert_eq!(TransactionType::parse(""), None);
}

#[test]
fn test_transaction_type_serializes_lowercase() {
    let json = serde_json::to_string(&TransactionType::Expense).unwrap();
    assert_eq!(json, "\"expense\"");
}

// ── TransactionDraft::validate ────────────────────────────────

#[test]
fn test_validate_valid_draft() {
    let txn = draft("Expense", "12.50", "Food", "2024-01-20").validate().unwrap();
    assert_eq!(txn.kind, TransactionType::Expense);
    assert_eq!(txn.amount, dec!(12.50));
    assert_eq!(txn.description, "Lunch");
    assert_eq!(txn.category, "Food");
    assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
}

#[test]
fn test_validate_defaults_blank_description() {
    let mut d = draft("income", "1000", "Salary", "2024-01-15");
    d.description = "   ".into();
    let txn = d.validate().unwrap();
    assert_eq!(txn.description, DEFAULT_DESCRIPTION);
}

#[test]
fn test_validate_reports_first_missing_field() {
    let d = TransactionDraft::default();
    assert_eq!(d.validate(), Err(ValidationError::MissingField("type")));

    let d = draft("income", "", "", "");
    assert_eq!(d.validate(), Err(ValidationError::MissingField("amount")));

    let d = draft("income", "5", " ", "");
    assert_eq!(d.validate(), Err(ValidationError::MissingField("category")));

    let d = draft("income", "5", "Gift", "");
    assert_eq!(d.validate(), Err(ValidationError::MissingField("date")));
}

#[test]
fn test_validate_rejects_unknown_type() {
    let d = draft("transfer", "5", "Food", "2024-01-01");
    assert_eq!(
        d.validate(),
        Err(ValidationError::UnknownType("transfer".into()))
    );
}

#[test]
fn test_validate_rejects_non_positive_amount() {
    for amount in ["0", "-5", "0.00"] {
        let d = draft("expense", amount, "Food", "2024-01-01");
        assert_eq!(d.validate(), Err(ValidationError::NonPositiveAmount));
    }
}

#[test]
fn test_validate_rejects_bad_date() {
    let d = draft("expense", "5", "Food", "yesterday");
    assert_eq!(
        d.validate(),
        Err(ValidationError::InvalidDate("yesterday".into()))
    );
}

// ── parse_amount / parse_date ─────────────────────────────────

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("5.50").unwrap(), dec!(5.50));
    assert_eq!(parse_amount(" 42 ").unwrap(), dec!(42));
    assert_eq!(parse_amount("1e3").unwrap(), dec!(1000));
    assert!(matches!(
        parse_amount("abc"),
        Err(ValidationError::InvalidAmount(_))
    ));
}

#[test]
fn test_parse_amount_upper_bound() {
    assert_eq!(parse_amount("1000000000000").unwrap(), dec!(1000000000000));
    for raw in ["1000000000000.01", "79228162514264337593543950335", "1e20"] {
        assert!(matches!(
            parse_amount(raw),
            Err(ValidationError::AmountTooLarge(_))
        ));
    }
}

#[test]
fn test_parse_date_formats() {
    let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    assert_eq!(parse_date("2024-03-09").unwrap(), expected);
    assert_eq!(parse_date("03/09/2024").unwrap(), expected);
    assert_eq!(parse_date("2024/03/09").unwrap(), expected);
    assert!(parse_date("2024-13-01").is_err());
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_transaction_json_shape() {
    let txn = Transaction {
        id: 1705312345678,
        kind: TransactionType::Income,
        amount: dec!(1000),
        description: "Paycheck".into(),
        category: "Salary".into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    };
    let value = serde_json::to_value(&txn).unwrap();
    assert_eq!(value["type"], "income");
    assert_eq!(value["date"], "2024-01-15");
    assert_eq!(value["amount"].as_f64(), Some(1000.0));

    let back: Transaction = serde_json::from_value(value).unwrap();
    assert_eq!(back, txn);
}

#[test]
fn test_transaction_is_valid() {
    let mut txn = Transaction::new(
        1,
        draft("expense", "3", "Food", "2024-01-01").validate().unwrap(),
    );
    assert!(txn.is_valid());
    assert!(txn.is_expense());
    assert!(!txn.is_income());

    txn.amount = Decimal::ZERO;
    assert!(!txn.is_valid());
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_new() {
    let b = Budget::new(" Food ", dec!(150)).unwrap();
    assert_eq!(b.category, "Food");
    assert_eq!(b.limit, dec!(150));

    assert_eq!(
        Budget::new("", dec!(150)),
        Err(ValidationError::MissingField("category"))
    );
    assert_eq!(
        Budget::new("Food", dec!(0)),
        Err(ValidationError::NonPositiveAmount)
    );
    assert_eq!(
        Budget::new("Food", Decimal::MAX),
        Err(ValidationError::AmountTooLarge(dec!(1000000000000)))
    );
}

// ── Category catalog ──────────────────────────────────────────

#[test]
fn test_catalog_lists() {
    assert_eq!(category::for_type(TransactionType::Income).len(), 5);
    assert_eq!(category::for_type(TransactionType::Expense).len(), 8);
}

#[test]
fn test_catalog_find_by_name() {
    assert_eq!(
        category::find_by_name(TransactionType::Expense, "food"),
        Some("Food")
    );
    assert_eq!(category::find_by_name(TransactionType::Income, "Food"), None);
}
