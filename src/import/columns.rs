use crate::error::FormatError;

/// Canonical column names every import file must carry, in the order they
/// are reported when missing.
pub(crate) const REQUIRED_COLUMNS: [&str; 5] = ["date", "description", "category", "type", "amount"];

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    pub(crate) date: usize,
    pub(crate) description: usize,
    pub(crate) category: usize,
    pub(crate) kind: usize,
    pub(crate) amount: usize,
}

impl ColumnMap {
    /// Locate every required column in `headers`, which must already be
    /// normalized with [`normalize_header`].
    pub(crate) fn locate(headers: &[String]) -> Result<Self, FormatError> {
        let found = REQUIRED_COLUMNS.map(|name| col_index(headers, name));
        let missing: Vec<&'static str> = REQUIRED_COLUMNS
            .iter()
            .zip(found.iter())
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| *name)
            .collect();

        match found {
            [Some(date), Some(description), Some(category), Some(kind), Some(amount)] => Ok(Self {
                date,
                description,
                category,
                kind,
                amount,
            }),
            _ => Err(FormatError::MissingColumns(missing)),
        }
    }
}

/// Lowercase, trim and drop any double quotes from a header cell.
pub(crate) fn normalize_header(cell: &str) -> String {
    cell.replace('"', "").trim().to_lowercase()
}

/// Exact header match first, then the first header containing `name`.
fn col_index(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .or_else(|| headers.iter().position(|h| h.contains(name)))
}

#[cfg(test)]
#[path = "columns_tests.rs"]
mod tests;
