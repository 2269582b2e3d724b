use crate::errors::ThreatError;

pub const TITLE_COLUMN: &str = "Title";
pub const DESCRIPTION_COLUMN: &str = "Description";

/// One spreadsheet row as read, before validation. A column missing from the
/// header reads as an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatRow {
    pub title: String,
    pub description: String,
}

impl ThreatRow {
    /// Trimmed `(title, description)` when both are non-empty.
    pub fn validated(&self) -> Option<(&str, &str)> {
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() || description.is_empty() {
            None
        } else {
            Some((title, description))
        }
    }
}

/// Parse UTF-8 CSV with a header row into threat rows.
///
/// Extra columns are ignored and short rows are tolerated. Fails on invalid
/// UTF-8, malformed records, or input with no header row at all.
pub fn read_rows(data: &[u8]) -> Result<Vec<ThreatRow>, ThreatError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ThreatError::Csv("No columns to parse from file".into()));
    }

    let position = |name: &str| {
        headers.iter().position(|h| h.trim_start_matches('\u{feff}').trim() == name)
    };
    let title_idx = position(TITLE_COLUMN);
    let description_idx = position(DESCRIPTION_COLUMN);

    let field = |record: &csv::StringRecord, idx: Option<usize>| {
        idx.and_then(|i| record.get(i)).unwrap_or_default().to_string()
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(ThreatRow {
            title: field(&record, title_idx),
            description: field(&record, description_idx),
        });
    }
    Ok(rows)
}
