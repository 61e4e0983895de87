use crate::domain::entities::record::{ComponentRecord, PricingFields};
use crate::domain::entities::rows::{GridRow, NestedRow, PathRow, Totals};

fn record_totals(record: &ComponentRecord, fields: PricingFields) -> Totals {
    let quantity = record.number(fields.quantity).unwrap_or(0.0);
    let unit_price = record.number(fields.unit_price).unwrap_or(0.0);
    let labor_charge = record.number(fields.labor_charge).unwrap_or(0.0);
    let total_price = quantity * unit_price;
    let total_labor = quantity * labor_charge;
    Totals {
        total_items: quantity,
        total_price,
        total_labor,
        grand_total: total_price + total_labor,
    }
}

/// `quantity × (unit price + labor charge)`, absent operands count as zero.
pub fn line_total(record: &ComponentRecord, fields: PricingFields) -> f64 {
    record_totals(record, fields).grand_total
}

/// Grid-wide totals; category header rows are skipped.
pub fn aggregate(rows: &[GridRow], fields: PricingFields) -> Totals {
    rows.iter()
        .filter_map(GridRow::as_record)
        .fold(Totals::default(), |acc, record| {
            acc.merge(record_totals(record, fields))
        })
}

#[allow(dead_code)]
pub fn aggregate_records(records: &[ComponentRecord], fields: PricingFields) -> Totals {
    records.iter().fold(Totals::default(), |acc, record| {
        acc.merge(record_totals(record, fields))
    })
}

/// Bottom-up totals over nested rows. A node with children contributes the
/// sum of its children; its own numeric fields are not counted again.
#[allow(dead_code)]
pub fn aggregate_tree(nodes: &[NestedRow], fields: PricingFields) -> Totals {
    nodes.iter().fold(Totals::default(), |acc, node| {
        let node_totals = if node.is_leaf() {
            record_totals(&node.record, fields)
        } else {
            aggregate_tree(&node.children, fields)
        };
        acc.merge(node_totals)
    })
}

/// Path-flattened counterpart of [`aggregate_tree`]: only rows without
/// descendants are counted.
pub fn aggregate_path_rows(rows: &[PathRow], fields: PricingFields) -> Totals {
    rows.iter()
        .filter(|row| !rows.iter().any(|other| row.is_ancestor_of(other)))
        .fold(Totals::default(), |acc, row| {
            acc.merge(record_totals(&row.record, fields))
        })
}

pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{fraction}")
}
