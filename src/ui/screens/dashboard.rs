use chrono::NaiveDate;

use crate::reports::Snapshot;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(snapshot: &Snapshot<'_>, today: NaiveDate, months: usize) -> String {
    let totals = snapshot.totals();
    let mut lines = vec![
        "Expense Tracker".to_string(),
        super::rule(),
        format!("  Balance:    {:>14}", format_amount(totals.balance)),
        format!("  Income:     {:>14}", format_amount(totals.income)),
        format!("  Expenses:   {:>14}", format_amount(totals.expenses)),
        String::new(),
        "Spending by Category".to_string(),
    ];

    let breakdown = snapshot.category_breakdown();
    if breakdown.is_empty() {
        lines.push("  No expenses recorded yet".to_string());
    }
    for entry in &breakdown {
        lines.push(format!(
            "  {:<24} {:>14}",
            truncate(&entry.category, 24),
            format_amount(entry.amount)
        ));
    }

    lines.push(String::new());
    lines.push(format!("  {:<10} {:>14} {:>14}", "Month", "Income", "Expenses"));
    for month in snapshot.monthly_series(today, months) {
        lines.push(format!(
            "  {:<10} {:>14} {:>14}",
            month.label,
            format_amount(month.income),
            format_amount(month.expenses)
        ));
    }

    let budgets = snapshot.budget_status();
    if !budgets.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Budgets: {} of {} spent ({:.0}%), {} remaining",
            format_amount(budgets.total_spent),
            format_amount(budgets.total_budget),
            budgets.progress_percent,
            format_amount(budgets.total_remaining)
        ));
    }

    lines.join("\n")
}
