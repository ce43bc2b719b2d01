mod config;
mod db;
mod error;
mod export;
mod import;
mod ledger;
mod models;
mod reports;
mod run;
mod ui;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use ledger::Ledger;

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().collect();
    let config = Config::from_args(&mut args)?;
    init_logging(config.verbose);

    let db_path = config.db_path()?;
    let db = db::Database::open(&db_path)?;
    let mut ledger = Ledger::load(db);
    let today = chrono::Local::now().date_naive();

    match args.len() {
        0 | 1 => run::as_dashboard(&ledger, &config, today),
        _ => run::as_cli(&args, &mut ledger, &config, today),
    }
}

/// `RUST_LOG` wins, then `--verbose`, then warnings only. Logs go to stderr
/// so command output on stdout stays clean.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}
