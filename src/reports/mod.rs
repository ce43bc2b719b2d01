//! Derived views over a ledger snapshot.
//!
//! Everything here is recomputed from scratch on each call; nothing is cached.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Transaction, TransactionType};

/// Number of trailing months shown by the dashboard series.
pub(crate) const DEFAULT_MONTHS_BACK: usize = 6;

/// Longest series the dashboard will compute.
pub(crate) const MAX_MONTHS_BACK: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Income and expense sums for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyTotals {
    pub year: i32,
    pub month: u32,
    /// e.g. `"Jan 2024"`
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetLine {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    /// `spent / limit * 100`, not clamped.
    pub progress_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetStatus {
    pub lines: Vec<BudgetLine>,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub total_remaining: Decimal,
    pub progress_percent: Decimal,
}

impl BudgetStatus {
    pub(crate) fn get(&self, category: &str) -> Option<&BudgetLine> {
        self.lines.iter().find(|l| l.category == category)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// History filter. Empty text and `None` filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SearchQuery {
    pub text: String,
    pub category: Option<String>,
    pub kind: Option<TransactionType>,
}

impl SearchQuery {
    fn matches(&self, txn: &Transaction, needle: &str) -> bool {
        let text_ok = needle.is_empty()
            || txn.description.to_lowercase().contains(needle)
            || txn.category.to_lowercase().contains(needle);
        let category_ok = match self.category.as_deref() {
            None | Some("") => true,
            Some(c) => txn.category == c,
        };
        let kind_ok = self.kind.map_or(true, |k| txn.kind == k);
        text_ok && category_ok && kind_ok
    }
}

/// Read-only view of the ledger that all derived figures are computed from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Snapshot<'a> {
    transactions: &'a [Transaction],
    budgets: &'a BTreeMap<String, Decimal>,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(
        transactions: &'a [Transaction],
        budgets: &'a BTreeMap<String, Decimal>,
    ) -> Self {
        Self {
            transactions,
            budgets,
        }
    }

    pub(crate) fn totals(&self) -> Totals {
        let income = sum(self.amounts(TransactionType::Income));
        let expenses = sum(self.amounts(TransactionType::Expense));
        Totals {
            income,
            expenses,
            balance: income.saturating_sub(expenses),
        }
    }

    /// Expense totals per category, in order of each category's first expense.
    pub(crate) fn category_breakdown(&self) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for txn in self.transactions.iter().filter(|t| t.is_expense()) {
            match index.get(txn.category.as_str()) {
                Some(&i) => totals[i].amount = totals[i].amount.saturating_add(txn.amount),
                None => {
                    index.insert(&txn.category, totals.len());
                    totals.push(CategoryTotal {
                        category: txn.category.clone(),
                        amount: txn.amount,
                    });
                }
            }
        }
        totals
    }

    /// Income and expenses for the `months_back` calendar months ending with
    /// the month containing `today`, oldest first. Empty months are zero.
    pub(crate) fn monthly_series(&self, today: NaiveDate, months_back: usize) -> Vec<MonthlyTotals> {
        let current = today.year() * 12 + today.month0() as i32;
        let months_back = i32::try_from(months_back.min(MAX_MONTHS_BACK)).unwrap_or_default();
        (0..months_back)
            .rev()
            .map(|back| {
                let index = current - back;
                let year = index.div_euclid(12);
                let month = index.rem_euclid(12) as u32 + 1;
                let in_month = |t: &&Transaction| t.date.year() == year && t.date.month() == month;
                let income = sum(self
                    .transactions
                    .iter()
                    .filter(in_month)
                    .filter(|t| t.is_income())
                    .map(|t| t.amount));
                let expenses = sum(self
                    .transactions
                    .iter()
                    .filter(in_month)
                    .filter(|t| t.is_expense())
                    .map(|t| t.amount));
                MonthlyTotals {
                    year,
                    month,
                    label: month_label(year, month),
                    income,
                    expenses,
                }
            })
            .collect()
    }

    /// Spend against every budgeted category. Totals cover budgeted
    /// categories only.
    pub(crate) fn budget_status(&self) -> BudgetStatus {
        let mut spent_by_category: HashMap<&str, Decimal> = HashMap::new();
        for txn in self.transactions.iter().filter(|t| t.is_expense()) {
            let entry = spent_by_category.entry(&txn.category).or_default();
            *entry = entry.saturating_add(txn.amount);
        }

        let lines: Vec<BudgetLine> = self
            .budgets
            .iter()
            .map(|(category, &limit)| {
                let spent = spent_by_category
                    .get(category.as_str())
                    .copied()
                    .unwrap_or_default();
                BudgetLine {
                    category: category.clone(),
                    limit,
                    spent,
                    remaining: limit.saturating_sub(spent),
                    progress_percent: percent(spent, limit),
                }
            })
            .collect();

        let total_budget = sum(lines.iter().map(|l| l.limit));
        let total_spent = sum(lines.iter().map(|l| l.spent));
        BudgetStatus {
            total_remaining: total_budget.saturating_sub(total_spent),
            progress_percent: percent(total_spent, total_budget),
            total_budget,
            total_spent,
            lines,
        }
    }

    /// Matching transactions, newest date first.
    pub(crate) fn search(&self, query: &SearchQuery) -> Vec<&'a Transaction> {
        let needle = query.text.to_lowercase();
        let transactions: &'a [Transaction] = self.transactions;
        let matched = transactions
            .iter()
            .filter(|t| query.matches(t, &needle))
            .collect();
        newest_first(matched)
    }

    /// Every transaction, newest date first.
    pub(crate) fn history(&self) -> Vec<&'a Transaction> {
        let transactions: &'a [Transaction] = self.transactions;
        newest_first(transactions.iter().collect())
    }

    fn amounts(&self, kind: TransactionType) -> impl Iterator<Item = Decimal> + 'a {
        let transactions: &'a [Transaction] = self.transactions;
        transactions
            .iter()
            .filter(move |t| t.kind == kind)
            .map(|t| t.amount)
    }
}

/// Stable: transactions on the same day keep their insertion order.
fn newest_first(mut txns: Vec<&Transaction>) -> Vec<&Transaction> {
    txns.sort_by(|a, b| b.date.cmp(&a.date));
    txns
}

fn sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

fn percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month:02}"))
}
