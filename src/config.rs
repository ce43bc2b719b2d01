use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::reports::{DEFAULT_MONTHS_BACK, MAX_MONTHS_BACK};

/// Global options, accepted anywhere on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: Option<PathBuf>,
    pub(crate) months: usize,
    pub(crate) verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            months: DEFAULT_MONTHS_BACK,
            verbose: false,
        }
    }
}

impl Config {
    /// Pull `--db <path>`, `--months <N>` and `-v/--verbose` out of `args`,
    /// leaving the command and its own arguments behind.
    pub(crate) fn from_args(args: &mut Vec<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = take_value(args, "--db")? {
            config.db_path = Some(PathBuf::from(shellexpand(&path)));
        }

        if let Some(raw) = take_value(args, "--months")? {
            let months: usize = raw
                .parse()
                .with_context(|| format!("Invalid --months value: {raw}"))?;
            if !(1..=MAX_MONTHS_BACK).contains(&months) {
                anyhow::bail!("--months must be between 1 and {MAX_MONTHS_BACK}");
            }
            config.months = months;
        }

        let before = args.len();
        args.retain(|a| a != "-v" && a != "--verbose");
        config.verbose = args.len() != before;

        Ok(config)
    }

    /// The configured database file, or `expense-tracker.db` in the
    /// platform data directory (created if needed).
    pub(crate) fn db_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }
        let proj_dirs = directories::ProjectDirs::from("com", "expense-tracker", "ExpenseTracker")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(data_dir.join("expense-tracker.db"))
    }
}

/// Remove `flag` and its value from `args`. Only the first occurrence
/// counts; the program name in `args[0]` is never a flag.
fn take_value(args: &mut Vec<String>, flag: &str) -> Result<Option<String>> {
    let Some(pos) = args.iter().skip(1).position(|a| a == flag).map(|p| p + 1) else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        anyhow::bail!("{flag} requires a value");
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let mut a = args(&["expense-tracker", "budgets"]);
        let config = Config::from_args(&mut a).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.months, 6);
        assert_eq!(a, args(&["expense-tracker", "budgets"]));
    }

    #[test]
    fn test_global_flags_are_stripped() {
        let mut a = args(&[
            "expense-tracker",
            "--db",
            "/tmp/ledger.db",
            "history",
            "-v",
            "--months",
            "12",
            "--type",
            "income",
        ]);
        let config = Config::from_args(&mut a).unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/ledger.db")));
        assert_eq!(config.months, 12);
        assert!(config.verbose);
        assert_eq!(a, args(&["expense-tracker", "history", "--type", "income"]));
    }

    #[test]
    fn test_months_must_be_positive() {
        let mut a = args(&["expense-tracker", "--months", "0"]);
        assert!(Config::from_args(&mut a).is_err());

        let mut a = args(&["expense-tracker", "--months", "six"]);
        assert!(Config::from_args(&mut a).is_err());
    }

    #[test]
    fn test_months_upper_bound() {
        let mut a = args(&["expense-tracker", "--months", "120"]);
        assert_eq!(Config::from_args(&mut a).unwrap().months, 120);

        let mut a = args(&["expense-tracker", "--months", "121"]);
        let err = Config::from_args(&mut a).unwrap_err();
        assert_eq!(err.to_string(), "--months must be between 1 and 120");

        let mut a = args(&["expense-tracker", "--months", "5000000000"]);
        assert!(Config::from_args(&mut a).is_err());
    }

    #[test]
    fn test_flag_without_value() {
        let mut a = args(&["expense-tracker", "--db"]);
        assert!(Config::from_args(&mut a).is_err());
    }

    #[test]
    fn test_explicit_db_path_wins() {
        let config = Config {
            db_path: Some(PathBuf::from("/tmp/x.db")),
            ..Config::default()
        };
        assert_eq!(config.db_path().unwrap(), PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn test_shellexpand_home() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        assert_eq!(shellexpand("~/ledger.db"), format!("{home}/ledger.db"));
        assert_eq!(shellexpand("/abs/ledger.db"), "/abs/ledger.db");
    }
}
