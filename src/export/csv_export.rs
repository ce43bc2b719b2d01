use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ExportError;
use crate::models::Transaction;

pub(crate) const CSV_HEADER: [&str; 5] = ["Date", "Description", "Category", "Type", "Amount"];

/// Write `transactions` as CSV in the order given.
///
/// Descriptions are wrapped in double quotes with no escaping, so a
/// description containing a quote or comma will not read back cleanly.
pub(crate) fn write_csv<W: Write>(out: W, transactions: &[Transaction]) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    wtr.write_record(CSV_HEADER)?;
    for txn in transactions {
        let date = txn.date.format("%Y-%m-%d").to_string();
        let description = format!("\"{}\"", txn.description);
        let amount = txn.amount.normalize().to_string();
        wtr.write_record([
            date.as_str(),
            description.as_str(),
            txn.category.as_str(),
            txn.kind.as_str(),
            amount.as_str(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn to_csv_string(transactions: &[Transaction]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, transactions)?;
    Ok(String::from_utf8(buf)?)
}

/// e.g. `expense-tracker-2024-01-31.csv`
fn export_file_name(date: NaiveDate) -> String {
    format!("expense-tracker-{}.csv", date.format("%Y-%m-%d"))
}

/// Write every transaction to `dir/expense-tracker-<today>.csv`, replacing
/// any file already there.
pub(crate) fn export_to_dir(
    dir: &Path,
    transactions: &[Transaction],
    today: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_file_name(today));
    let file = File::create(&path).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    write_csv(BufWriter::new(file), transactions)?;
    info!(file = %path.display(), count = transactions.len(), "exported transactions");
    Ok(path)
}

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
