use crate::models::{Transaction, TransactionType};
use crate::reports::SearchQuery;
use crate::ui::util::{capitalize, format_amount, format_date, truncate};

pub(crate) fn render(transactions: &[&Transaction], query: &SearchQuery) -> String {
    if transactions.is_empty() {
        return if query == &SearchQuery::default() {
            "No transactions yet".to_string()
        } else {
            "No transactions match your filters".to_string()
        };
    }

    let mut lines = vec![
        format!(
            "{:<13} {:<28} {:<16} {:<8} {:>14}",
            "Date", "Description", "Category", "Type", "Amount"
        ),
        "─".repeat(83),
    ];
    for txn in transactions {
        let sign = match txn.kind {
            TransactionType::Income => "+",
            TransactionType::Expense => "-",
        };
        lines.push(format!(
            "{:<13} {:<28} {:<16} {:<8} {:>14}",
            format_date(txn.date),
            truncate(&txn.description, 28),
            truncate(&txn.category, 16),
            capitalize(txn.kind.as_str()),
            format!("{sign}{}", format_amount(txn.amount))
        ));
    }
    lines.push(format!("{} transaction(s)", transactions.len()));
    lines.join("\n")
}
