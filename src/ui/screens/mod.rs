//! Plain-text screens. Each `render` returns the full screen as a string so
//! callers decide where it goes.

pub(crate) mod budgets;
pub(crate) mod categories;
pub(crate) mod dashboard;
pub(crate) mod transactions;

const RULE_WIDTH: usize = 48;

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}
