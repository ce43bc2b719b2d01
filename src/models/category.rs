use super::TransactionType;

pub(crate) const INCOME_CATEGORIES: &[&str] =
    &["Salary", "Freelance", "Investment", "Gift", "Other Income"];

pub(crate) const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transportation",
    "Entertainment",
    "Utilities",
    "Healthcare",
    "Shopping",
    "Education",
    "Other Expense",
];

/// Suggested categories for one transaction type. Not enforced on stored data.
pub(crate) fn for_type(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

/// Find a catalog entry by name (case-insensitive).
pub(crate) fn find_by_name(kind: TransactionType, name: &str) -> Option<&'static str> {
    let lower = name.trim().to_lowercase();
    for_type(kind)
        .iter()
        .copied()
        .find(|c| c.to_lowercase() == lower)
}
