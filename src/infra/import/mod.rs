use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use tracing::warn;

use crate::domain::entities::record::{ComponentRecord, FieldValue};

pub mod csv;
pub mod xlsx;

/// Header row plus body rows of an imported sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<ComponentRecord>,
}

impl ParsedTable {
    /// Builds one record per row. Repeated header names are renamed first so
    /// every column keeps its own values.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = unique_headers(headers);
        let rows = rows
            .into_iter()
            .map(|row| {
                ComponentRecord::from_pairs(headers.iter().enumerate().map(|(col_idx, header)| {
                    let value = row.get(col_idx).cloned().unwrap_or_default();
                    (header.clone(), FieldValue::Text(value))
                }))
            })
            .collect();
        Self { headers, rows }
    }
}

/// Renames repeated headers `Qty`, `Qty` to `Qty`, `Qty_1`, skipping suffixes
/// that already exist as header names.
fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let existing: HashSet<String> = headers.iter().cloned().collect();
    let mut used = HashSet::new();
    headers
        .into_iter()
        .map(|header| {
            if used.insert(header.clone()) {
                return header;
            }
            let mut suffix = 1;
            loop {
                let candidate = format!("{header}_{suffix}");
                if !existing.contains(&candidate) && used.insert(candidate.clone()) {
                    warn!(header = %header, renamed = %candidate, "duplicate header renamed");
                    return candidate;
                }
                suffix += 1;
            }
        })
        .collect()
}

pub fn is_spreadsheet(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();
    matches!(ext.as_str(), "xlsx" | "xlsm" | "xls" | "ods")
}

/// Reads a component sheet; spreadsheet extensions go through calamine,
/// everything else is treated as CSV.
pub fn read_table(path: &Path) -> Result<ParsedTable> {
    if is_spreadsheet(path) {
        self::xlsx::read_xlsx_table(path)
    } else {
        self::csv::read_csv_table(path)
    }
}
