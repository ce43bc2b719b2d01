use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Description given to manual entries left blank.
pub(crate) const DEFAULT_DESCRIPTION: &str = "Transaction";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Case-insensitive; surrounding whitespace is ignored.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [TransactionType] {
        &[Self::Income, Self::Expense]
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored ledger entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub(crate) fn new(id: i64, txn: NewTransaction) -> Self {
        Self {
            id,
            kind: txn.kind,
            amount: txn.amount,
            description: txn.description,
            category: txn.category,
            date: txn.date,
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Whether this record satisfies the stored-record invariants.
    /// Used to screen entries read back from storage.
    pub(crate) fn is_valid(&self) -> bool {
        self.amount > Decimal::ZERO
            && !self.description.trim().is_empty()
            && !self.category.trim().is_empty()
    }
}

/// A validated transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewTransaction {
    pub kind: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
}

/// Raw, unvalidated transaction fields as typed by a user or read from a CSV row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TransactionDraft {
    pub kind: String,
    pub amount: String,
    pub description: String,
    pub category: String,
    pub date: String,
}

impl TransactionDraft {
    /// Check the draft and convert it into typed fields.
    ///
    /// Presence of `type`, `amount`, `category` and `date` is checked first,
    /// in that order, then each value is parsed. A blank description becomes
    /// [`DEFAULT_DESCRIPTION`].
    pub(crate) fn validate(&self) -> Result<NewTransaction, ValidationError> {
        let kind = self.kind.trim();
        let amount = self.amount.trim();
        let category = self.category.trim();
        let date = self.date.trim();

        for (name, value) in [
            ("type", kind),
            ("amount", amount),
            ("category", category),
            ("date", date),
        ] {
            if value.is_empty() {
                return Err(ValidationError::MissingField(name));
            }
        }

        let kind =
            TransactionType::parse(kind).ok_or_else(|| ValidationError::UnknownType(kind.into()))?;
        let amount = parse_amount(amount)?;
        let date = parse_date(date)?;

        let description = match self.description.trim() {
            "" => DEFAULT_DESCRIPTION.to_string(),
            d => d.to_string(),
        };

        Ok(NewTransaction {
            kind,
            amount,
            description,
            category: category.to_string(),
            date,
        })
    }
}

/// Parse a strictly positive decimal amount.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal, ValidationError> {
    let trimmed = s.trim();
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::InvalidAmount(trimmed.into()))?;
    check_amount(amount)
}

/// Largest amount a transaction or budget may carry. Stored amounts are JSON
/// numbers, so anything read back must stay well inside `f64` precision.
const MAX_WHOLE_AMOUNT: i64 = 1_000_000_000_000;

/// An amount must be positive and no larger than `MAX_WHOLE_AMOUNT`.
pub(crate) fn check_amount(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    let max = Decimal::from(MAX_WHOLE_AMOUNT);
    if amount > max {
        return Err(ValidationError::AmountTooLarge(max));
    }
    Ok(amount)
}

/// Parse a calendar date. ISO `YYYY-MM-DD` is the stored form; a couple of
/// common spreadsheet layouts are accepted on input.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = s.trim();
    for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(d);
        }
    }
    Err(ValidationError::InvalidDate(trimmed.into()))
}
