use thiserror::Error;
use tracing::info;

use crate::domain::entities::record::{format_number, parse_numeric_value, PricingFields};
use crate::domain::entities::rows::{GridRow, NestedRow, PathRow, Totals};
use crate::domain::services::aggregation::{
    aggregate, aggregate_path_rows, aggregate_tree, line_total,
};
use crate::domain::services::hierarchy::{propagate_nested_quantity, propagate_path_quantity};
use crate::usecase::notice::Notice;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("quantity must be a non-negative number, got \"{0}\"")]
    InvalidQuantity(String),
    #[error("row {0} has no editable quantity")]
    NotEditable(usize),
}

/// Outcome of one quantity edit, with totals recomputed over the whole view.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityChange {
    pub row: usize,
    pub old: Option<f64>,
    pub new: f64,
    pub rows_updated: usize,
    pub line_total: f64,
    pub totals: Totals,
}

impl QuantityChange {
    pub fn notice(&self) -> Notice {
        let old = self.old.map(format_number).unwrap_or_else(|| "empty".to_string());
        let mut description = format!("Quantity changed from {old} to {}", format_number(self.new));
        if self.rows_updated > 1 {
            description.push_str(&format!(" ({} rows updated)", self.rows_updated));
        }
        Notice::success(description)
    }
}

pub fn parse_quantity(raw: &str) -> Result<f64, EditError> {
    parse_numeric_value(raw)
        .filter(|value| *value >= 0.0)
        .ok_or_else(|| EditError::InvalidQuantity(raw.trim().to_string()))
}

pub fn edit_quantity(
    rows: &mut [GridRow],
    row: usize,
    raw: &str,
    fields: PricingFields,
) -> Result<QuantityChange, EditError> {
    let new = parse_quantity(raw)?;
    let record = rows
        .get_mut(row)
        .and_then(GridRow::as_record_mut)
        .ok_or(EditError::NotEditable(row))?;

    let old = record.number(fields.quantity);
    record.set(fields.quantity, new);
    let line = line_total(record, fields);

    info!(row, ?old, new, "quantity edited");
    Ok(QuantityChange {
        row,
        old,
        new,
        rows_updated: 1,
        line_total: line,
        totals: aggregate(rows, fields),
    })
}

/// Edits a tree row; the new quantity is copied to every row below it.
pub fn edit_path_quantity(
    rows: &mut [PathRow],
    row: usize,
    raw: &str,
    fields: PricingFields,
) -> Result<QuantityChange, EditError> {
    let new = parse_quantity(raw)?;
    let target = rows.get(row).ok_or(EditError::NotEditable(row))?;
    let old = target.record.number(fields.quantity);
    let path = target.path.clone();

    let rows_updated = propagate_path_quantity(rows, &path, fields.quantity, new);
    let line = line_total(&rows[row].record, fields);

    info!(row, ?old, new, rows_updated, "tree quantity edited");
    Ok(QuantityChange {
        row,
        old,
        new,
        rows_updated,
        line_total: line,
        totals: aggregate_path_rows(rows, fields),
    })
}

/// Edits the main item of a nested tree; every sub-component follows.
#[allow(dead_code)]
pub fn edit_nested_quantity(
    root: &mut NestedRow,
    raw: &str,
    fields: PricingFields,
) -> Result<QuantityChange, EditError> {
    let new = parse_quantity(raw)?;
    let old = root.record.number(fields.quantity);

    propagate_nested_quantity(root, fields.quantity, new);
    let totals = aggregate_tree(std::slice::from_ref(root), fields);

    Ok(QuantityChange {
        row: 0,
        old,
        new,
        rows_updated: count_nodes(root),
        line_total: totals.grand_total,
        totals,
    })
}

#[allow(dead_code)]
fn count_nodes(node: &NestedRow) -> usize {
    1 + node.children.iter().map(count_nodes).sum::<usize>()
}
