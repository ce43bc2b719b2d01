use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{shellexpand, Config};
use crate::db::KeyValueStore;
use crate::error::LedgerError;
use crate::export::export_to_dir;
use crate::import::CsvImporter;
use crate::ledger::Ledger;
use crate::models::{parse_amount, TransactionDraft, TransactionType, DEFAULT_DESCRIPTION};
use crate::reports::SearchQuery;
use crate::ui::screens;
use crate::ui::util::{format_amount, format_date};

pub(crate) fn as_cli<S: KeyValueStore>(
    args: &[String],
    ledger: &mut Ledger<S>,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    let mut output = match args[1].as_str() {
        "dashboard" | "d" => cli_dashboard(ledger, config, today),
        "add" | "a" => cli_add(&args[2..], ledger, today),
        "budget" => cli_budget(&args[2..], ledger),
        "budgets" | "b" => Ok(screens::budgets::render(&ledger.snapshot().budget_status())),
        "history" | "h" => cli_history(&args[2..], ledger),
        "import" => cli_import(&args[2..], ledger),
        "export" => cli_export(&args[2..], ledger, today),
        "categories" => cli_categories(&args[2..]),
        "--help" | "-h" | "help" => Ok(usage()),
        "--version" | "-V" | "version" => Ok(format!("expense-tracker {}", env!("CARGO_PKG_VERSION"))),
        other => {
            println!("{}", usage());
            anyhow::bail!("Unknown command: {other}");
        }
    };

    // A write that failed mid-command gets one more try before exit
    if ledger.is_dirty() {
        ledger.persist().context("Failed to save ledger")?;
        if output.as_ref().is_err_and(|err| is_unsaved_change(err)) {
            info!("ledger saved on retry");
            output = Ok("Change saved after retrying the write".to_string());
        }
    }

    println!("{}", output?);
    Ok(())
}

/// The command's own change went through but its write did not.
fn is_unsaved_change(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::Persistence(_))
    )
}

pub(crate) fn cli_dashboard<S: KeyValueStore>(
    ledger: &Ledger<S>,
    config: &Config,
    today: NaiveDate,
) -> Result<String> {
    Ok(screens::dashboard::render(
        &ledger.snapshot(),
        today,
        config.months,
    ))
}

fn usage() -> String {
    [
        "Expense Tracker: income, expenses and budgets in one local ledger".to_string(),
        String::new(),
        "Usage: expense-tracker [options] [command]".to_string(),
        String::new(),
        "Commands:".to_string(),
        "  (none), dashboard                 Totals, spending by category, monthly trend".to_string(),
        "  add <income|expense> <amount> <category>".to_string(),
        "    --date <YYYY-MM-DD>             Transaction date (default: today)".to_string(),
        format!("    --desc <text>                   Description (default: {DEFAULT_DESCRIPTION})"),
        "  budget set <category> <amount>    Set or replace a category budget".to_string(),
        "  budget delete <category>          Remove a category budget".to_string(),
        "  budgets                           Budget progress".to_string(),
        "  history                           All transactions, newest first".to_string(),
        "    --search <text>                 Match description or category".to_string(),
        "    --category <name>               Only this category".to_string(),
        "    --type <income|expense>         Only this type".to_string(),
        "  import <file.csv>                 Import Date,Description,Category,Type,Amount rows".to_string(),
        "  export [dir]                      Write expense-tracker-<date>.csv (default: .)".to_string(),
        "  categories [income|expense]       Suggested categories".to_string(),
        "  --help, -h                        Show this help".to_string(),
        "  --version, -V                     Show version".to_string(),
        String::new(),
        "Options:".to_string(),
        "  --db <path>                       Ledger database file".to_string(),
        "  --months <N>                      Months in the dashboard trend (default: 6)".to_string(),
        "  -v, --verbose                     Debug logging on stderr".to_string(),
    ]
    .join("\n")
}

/// Value following `flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither `--flag`s nor the value right after one.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
        } else if arg.starts_with("--") {
            skip_next = true;
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn parse_add_args(args: &[String], today: NaiveDate) -> Result<TransactionDraft> {
    let positional = positionals(args);
    let &[kind, amount, category] = positional.as_slice() else {
        anyhow::bail!("Usage: expense-tracker add <income|expense> <amount> <category> [--date YYYY-MM-DD] [--desc TEXT]");
    };
    Ok(TransactionDraft {
        kind: kind.to_string(),
        amount: amount.to_string(),
        description: flag_value(args, "--desc").unwrap_or_default().to_string(),
        category: category.to_string(),
        date: flag_value(args, "--date")
            .map(str::to_string)
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
    })
}

fn cli_add<S: KeyValueStore>(args: &[String], ledger: &mut Ledger<S>, today: NaiveDate) -> Result<String> {
    let draft = parse_add_args(args, today)?;
    let txn = ledger.add_transaction(&draft)?;
    Ok(format!(
        "Added {} of {} ({}, {}) on {}",
        txn.kind,
        format_amount(txn.amount),
        txn.category,
        txn.description,
        format_date(txn.date)
    ))
}

fn cli_budget<S: KeyValueStore>(args: &[String], ledger: &mut Ledger<S>) -> Result<String> {
    match args.first().map(String::as_str) {
        Some("set") => {
            let (Some(category), Some(raw)) = (args.get(1), args.get(2)) else {
                anyhow::bail!("Usage: expense-tracker budget set <category> <amount>");
            };
            let limit = parse_amount(raw)?;
            let previous = ledger.budgets().get(category.trim()).copied();
            let budget = ledger.set_budget(category, limit)?;

            let mut msg = match previous {
                Some(old) => format!(
                    "Updated {} budget from {} to {}",
                    budget.category,
                    format_amount(old),
                    format_amount(budget.limit)
                ),
                None => format!("Set {} budget to {}", budget.category, format_amount(budget.limit)),
            };
            if let Some(line) = ledger.snapshot().budget_status().get(&budget.category) {
                msg.push_str(&format!(
                    "\n{} spent so far, {} remaining",
                    format_amount(line.spent),
                    format_amount(line.remaining)
                ));
            }
            Ok(msg)
        }
        Some("delete") => {
            let Some(category) = args.get(1) else {
                anyhow::bail!("Usage: expense-tracker budget delete <category>");
            };
            if ledger.delete_budget(category)? {
                Ok(format!("Deleted {} budget", category.trim()))
            } else {
                Ok(format!("No budget set for {}", category.trim()))
            }
        }
        _ => anyhow::bail!("Usage: expense-tracker budget <set|delete> <category> [amount]"),
    }
}

fn parse_history_args(args: &[String]) -> Result<SearchQuery> {
    let kind = match flag_value(args, "--type") {
        Some(raw) => Some(
            TransactionType::parse(raw)
                .ok_or_else(|| anyhow::anyhow!("Unknown type '{raw}' (expected income or expense)"))?,
        ),
        None => None,
    };
    Ok(SearchQuery {
        text: flag_value(args, "--search").unwrap_or_default().to_string(),
        category: flag_value(args, "--category").map(str::to_string),
        kind,
    })
}

fn cli_history<S: KeyValueStore>(args: &[String], ledger: &Ledger<S>) -> Result<String> {
    let query = parse_history_args(args)?;
    let snapshot = ledger.snapshot();
    let results = if query == SearchQuery::default() {
        snapshot.history()
    } else {
        snapshot.search(&query)
    };
    Ok(screens::transactions::render(&results, &query))
}

fn cli_import<S: KeyValueStore>(args: &[String], ledger: &mut Ledger<S>) -> Result<String> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: expense-tracker import <file.csv>");
    };
    let path = PathBuf::from(shellexpand(file_path));
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let batch = CsvImporter::read_file(&path)?;
    if batch.accepted() == 0 {
        anyhow::bail!("No valid transactions found in the CSV file");
    }
    let skipped_in_file = batch.rejected;
    let summary = ledger.import_transactions(batch.rows)?;
    let skipped = skipped_in_file + summary.rejected;

    let mut msg = format!("Imported {} transactions successfully!", summary.accepted);
    if skipped > 0 {
        msg.push_str(&format!(" {skipped} rows had errors and were skipped."));
    }
    Ok(msg)
}

fn cli_export<S: KeyValueStore>(args: &[String], ledger: &Ledger<S>, today: NaiveDate) -> Result<String> {
    if ledger.transactions().is_empty() {
        return Ok("No transactions to export".to_string());
    }
    let dir = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| Path::new(".").to_path_buf());

    let path = export_to_dir(&dir, ledger.transactions(), today)?;
    Ok(format!(
        "Exported {} transactions to {}",
        ledger.transactions().len(),
        path.display()
    ))
}

fn cli_categories(args: &[String]) -> Result<String> {
    let kind = match args.first() {
        Some(raw) => Some(
            TransactionType::parse(raw)
                .ok_or_else(|| anyhow::anyhow!("Unknown type '{raw}' (expected income or expense)"))?,
        ),
        None => None,
    };
    Ok(screens::categories::render(kind))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
