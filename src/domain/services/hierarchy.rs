use std::collections::HashSet;

use tracing::debug;

use crate::domain::entities::record::ComponentRecord;
use crate::domain::entities::rows::{NestedRow, PathRow};

pub const DEFAULT_LABEL_FIELD: &str = "description";

/// Single root whose children are the subparts, in input order.
#[allow(dead_code)]
pub fn derive_nested(main: &ComponentRecord, subparts: &[ComponentRecord]) -> NestedRow {
    NestedRow {
        record: main.clone(),
        children: subparts.iter().cloned().map(NestedRow::leaf).collect(),
    }
}

fn record_label(record: &ComponentRecord, label_field: &str, position: usize) -> String {
    record
        .text(label_field)
        .map(|label| label.trim().to_string())
        .unwrap_or_else(|| format!("Item {}", position + 1))
}

/// Root row with path `[root]` followed by every subpart with `[root, label]`.
///
/// Sibling labels must be unique for the tree widget to keep them apart, so a
/// repeated label gets a ` (n)` suffix, numbered from 2 in input order.
pub fn derive_path_flattened(
    main: &ComponentRecord,
    subparts: &[ComponentRecord],
    label_field: &str,
) -> Vec<PathRow> {
    let root_label = record_label(main, label_field, 0);
    let mut rows = Vec::with_capacity(subparts.len() + 1);
    rows.push(PathRow {
        record: main.clone(),
        path: vec![root_label.clone()],
    });

    let mut used = HashSet::new();
    for (idx, subpart) in subparts.iter().enumerate() {
        let base = record_label(subpart, label_field, idx + 1);
        let mut label = base.clone();
        let mut suffix = 2;
        while !used.insert(label.clone()) {
            label = format!("{base} ({suffix})");
            suffix += 1;
        }
        rows.push(PathRow {
            record: subpart.clone(),
            path: vec![root_label.clone(), label],
        });
    }

    debug!(root = %root_label, rows = rows.len(), "derived path rows");
    rows
}

/// Direct sub-components of the node at `path`.
pub fn children_of<'a>(rows: &'a [PathRow], path: &[String]) -> Vec<&'a PathRow> {
    rows.iter()
        .filter(|row| row.path.len() == path.len() + 1 && row.path.starts_with(path))
        .collect()
}

/// Sets `quantity` on the root and every descendant.
#[allow(dead_code)]
pub fn propagate_nested_quantity(root: &mut NestedRow, quantity_field: &str, quantity: f64) {
    root.record.set(quantity_field, quantity);
    for child in &mut root.children {
        propagate_nested_quantity(child, quantity_field, quantity);
    }
}

/// Sets `quantity` on the row at `path` and on every row below it. Returns the
/// number of rows touched.
pub fn propagate_path_quantity(
    rows: &mut [PathRow],
    path: &[String],
    quantity_field: &str,
    quantity: f64,
) -> usize {
    let mut touched = 0;
    for row in rows.iter_mut().filter(|row| row.path.starts_with(path)) {
        row.record.set(quantity_field, quantity);
        touched += 1;
    }
    touched
}
