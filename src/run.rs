mod cli;

use anyhow::Result;
use chrono::NaiveDate;

use crate::config::Config;
use crate::db::KeyValueStore;
use crate::ledger::Ledger;

pub(crate) use cli::as_cli;

/// Print the dashboard; what a bare `expense-tracker` does.
pub(crate) fn as_dashboard<S: KeyValueStore>(
    ledger: &Ledger<S>,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    println!("{}", cli::cli_dashboard(ledger, config, today)?);
    Ok(())
}
