use std::path::Path;

use tracing::{debug, info};

use super::columns::{normalize_header, ColumnMap};
use crate::error::{FormatError, ValidationError};
use crate::models::TransactionDraft;

/// Rows read from one CSV file, split into those that validated and a count
/// of those that did not. Blank lines are in neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CsvBatch {
    pub(crate) rows: Vec<TransactionDraft>,
    pub(crate) rejected: usize,
}

impl CsvBatch {
    pub(crate) fn accepted(&self) -> usize {
        self.rows.len()
    }
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read and parse a `.csv` file from disk.
    pub(crate) fn read_file(path: &Path) -> Result<CsvBatch, FormatError> {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return Err(FormatError::NotCsv(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|source| FormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let batch = Self::parse(&text)?;
        info!(
            file = %path.display(),
            accepted = batch.accepted(),
            rejected = batch.rejected,
            "parsed CSV file"
        );
        Ok(batch)
    }

    /// Parse CSV text: a header line, then data lines.
    ///
    /// Fields are split on commas with no quoting grammar; double quotes are
    /// dropped from every field. A header missing any required column fails
    /// the whole parse.
    pub(crate) fn parse(text: &str) -> Result<CsvBatch, FormatError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut records = rdr.records();
        let headers: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(normalize_header).collect(),
            None => Vec::new(),
        };
        let columns = ColumnMap::locate(&headers)?;

        let mut batch = CsvBatch::default();
        for result in records {
            let record = result?;
            if is_blank(&record) {
                continue;
            }
            let line = record.position().map_or(0, |p| p.line());
            match parse_row(&record, &columns) {
                Ok(draft) => batch.rows.push(draft),
                Err(e) => {
                    debug!(line, error = %e, "skipping CSV row");
                    batch.rejected += 1;
                }
            }
        }
        Ok(batch)
    }
}

/// A line holding nothing but whitespace. A line of bare commas is not blank.
fn is_blank(record: &csv::StringRecord) -> bool {
    record.len() <= 1 && record.get(0).map_or(true, str::is_empty)
}

fn field(record: &csv::StringRecord, idx: usize) -> String {
    record
        .get(idx)
        .map(|s| s.replace('"', "").trim().to_string())
        .unwrap_or_default()
}

/// Pull one row into a draft and check it. Unlike manual entry, an import
/// row must carry its own description.
fn parse_row(record: &csv::StringRecord, columns: &ColumnMap) -> Result<TransactionDraft, ValidationError> {
    let draft = TransactionDraft {
        kind: field(record, columns.kind),
        amount: field(record, columns.amount),
        description: field(record, columns.description),
        category: field(record, columns.category),
        date: field(record, columns.date),
    };
    if draft.description.is_empty() {
        return Err(ValidationError::MissingField("description"));
    }
    draft.validate()?;
    Ok(draft)
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
