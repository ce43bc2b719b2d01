use rust_decimal::Decimal;

use super::transaction::check_amount;
use crate::error::ValidationError;

/// A spending limit bound to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Budget {
    pub category: String,
    pub limit: Decimal,
}

impl Budget {
    pub(crate) fn new(category: &str, limit: Decimal) -> Result<Self, ValidationError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        Ok(Self {
            category: category.to_string(),
            limit: check_amount(limit)?,
        })
    }
}
