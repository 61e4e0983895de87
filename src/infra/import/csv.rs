use std::path::Path;

use anyhow::{Context, Result};
use tracing::trace;

use crate::infra::import::ParsedTable;

pub fn read_csv_table(csv_path: &Path) -> Result<ParsedTable> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|header| header.trim().is_empty()) {
        anyhow::bail!("csv header is required")
    }

    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("failed to parse csv record {}", row_idx + 1))?;
        trace!(row_idx, fields = record.len(), "read csv record");
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(ParsedTable::from_rows(headers, rows))
}
