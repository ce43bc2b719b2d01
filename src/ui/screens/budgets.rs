use crate::reports::BudgetStatus;
use crate::ui::util::{format_amount, progress_bar, truncate};

const BAR_WIDTH: usize = 20;

pub(crate) fn render(status: &BudgetStatus) -> String {
    if status.is_empty() {
        return "No budgets set. Add your first budget to get started!".to_string();
    }

    let mut lines = vec!["Budgets".to_string(), super::rule()];
    for line in &status.lines {
        let flag = if line.spent > line.limit { "  OVER" } else { "" };
        lines.push(format!(
            "  {:<18} {}/{} {} {:.0}%{flag}",
            truncate(&line.category, 17),
            format_amount(line.spent),
            format_amount(line.limit),
            progress_bar(line.progress_percent, BAR_WIDTH),
            line.progress_percent
        ));
        lines.push(format!("  {:<18} {} remaining", "", format_amount(line.remaining)));
    }
    lines.push(super::rule());
    lines.push(format!(
        "  {:<18} {}/{} {} {:.0}%",
        "Total",
        format_amount(status.total_spent),
        format_amount(status.total_budget),
        progress_bar(status.progress_percent, BAR_WIDTH),
        status.progress_percent
    ));
    lines.join("\n")
}
