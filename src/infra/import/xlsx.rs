use std::path::Path;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use crate::infra::import::ParsedTable;

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.trim().to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Header cells keep their text as written; header matching is exact, the
/// same as for CSV.
pub fn header_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.clone(),
        other => cell_to_string(other),
    }
}

/// First worksheet of a workbook, first row taken as headers. Blank body rows
/// and trailing blank header cells are dropped.
pub fn read_xlsx_table(xlsx_path: &Path) -> Result<ParsedTable> {
    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open xlsx: {}", xlsx_path.display()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("workbook has no sheets: {}", xlsx_path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet: {sheet_name}"))?;

    let mut sheet_rows = range.rows();
    let mut headers: Vec<String> = sheet_rows
        .next()
        .ok_or_else(|| anyhow!("sheet {sheet_name} is empty"))?
        .iter()
        .map(header_to_string)
        .collect();
    while headers.last().is_some_and(|header| header.trim().is_empty()) {
        headers.pop();
    }
    if headers.is_empty() {
        anyhow::bail!("sheet {sheet_name} has no header row")
    }

    let rows: Vec<Vec<String>> = sheet_rows
        .map(|r| r.iter().map(cell_to_string).collect::<Vec<String>>())
        .filter(|row| row.iter().any(|value| !value.is_empty()))
        .collect();

    Ok(ParsedTable::from_rows(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_to_string_renders_numbers_and_blanks() {
        assert_eq!(cell_to_string(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_to_string(&Data::Int(3)), "3");
        assert_eq!(cell_to_string(&Data::String(" Qty ".to_string())), "Qty");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn header_cells_are_not_trimmed() {
        assert_eq!(header_to_string(&Data::String(" Qty ".to_string())), " Qty ");
        assert_eq!(header_to_string(&Data::String("Qty".to_string())), "Qty");
        assert_eq!(header_to_string(&Data::Int(7)), "7");
        assert_eq!(header_to_string(&Data::Empty), "");
    }
}
