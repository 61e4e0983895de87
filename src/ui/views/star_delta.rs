use dioxus::prelude::*;

use crate::domain::entities::record::{format_number, PricingFields};
use crate::domain::entities::rows::PathRow;
use crate::domain::sample_data::star_delta_columns;
use crate::domain::services::aggregation::{aggregate_path_rows, format_currency, line_total};
use crate::domain::services::hierarchy::children_of;
use crate::ui::views::grid_table::TotalsBar;
use crate::usecase::notice::Notice;
use crate::usecase::services::edit_service::edit_path_quantity;

const CELL_STYLE: &str = "border: 1px solid #ddd; padding: 4px 6px;";
const HEADER_CELL_STYLE: &str = "position: sticky; top: 0; background: #f3f4f6; border: 1px solid #bbb; padding: 6px; text-align: left;";
const INDENT_PX: usize = 18;

#[derive(Clone, Debug, PartialEq)]
struct TreeLine {
    row_idx: usize,
    path: Vec<String>,
    label: String,
    indent: usize,
    has_children: bool,
    cells: Vec<String>,
    quantity: String,
    line_total: String,
}

fn tree_lines(rows: &[PathRow], fields: PricingFields) -> Vec<TreeLine> {
    let columns = star_delta_columns();
    rows.iter()
        .enumerate()
        .map(|(row_idx, row)| TreeLine {
            row_idx,
            path: row.path.clone(),
            label: row.label().to_string(),
            indent: row.depth().saturating_sub(1) * INDENT_PX,
            has_children: !children_of(rows, &row.path).is_empty(),
            cells: columns
                .iter()
                .filter(|column| column.field != "description" && column.field != fields.quantity)
                .map(|column| row.record.display(&column.field))
                .collect(),
            quantity: row
                .record
                .number(fields.quantity)
                .map(format_number)
                .unwrap_or_default(),
            line_total: format_currency(line_total(&row.record, fields)),
        })
        .collect()
}

/// Tree of the star-delta starter and its sub-components. Editing the quantity
/// of a row applies the same quantity to every row below it.
#[component]
pub fn StarDeltaView(
    mut tree_rows: Signal<Vec<PathRow>>,
    mut selected_path: Signal<Option<Vec<String>>>,
    mut notice: Signal<Option<Notice>>,
) -> Element {
    let fields = PricingFields::CATALOG;
    let mut editing_row = use_signal(|| None::<usize>);
    let mut editing_value = use_signal(String::new);

    let rows = tree_rows.read().clone();
    let totals = aggregate_path_rows(&rows, fields);
    let lines = tree_lines(&rows, fields);
    let detail_headers: Vec<String> = star_delta_columns()
        .into_iter()
        .filter(|column| column.field != "description" && column.field != fields.quantity)
        .map(|column| column.header_name)
        .collect();
    let selected = selected_path();
    let children: Vec<(String, String)> = selected
        .as_ref()
        .map(|path| {
            children_of(&rows, path)
                .into_iter()
                .map(|child| {
                    (
                        child.label().to_string(),
                        format_currency(line_total(&child.record, fields)),
                    )
                })
                .collect()
        })
        .unwrap_or_default();
    let selected_label = selected
        .as_ref()
        .and_then(|path| path.last().cloned())
        .unwrap_or_default();
    let editing = editing_row();

    rsx! {
        div {
            TotalsBar { totals }
            div { style: "display: flex; gap: 16px; align-items: flex-start;",
                div { style: "flex: 3; max-height: 70vh; overflow: auto;",
                    table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                        thead {
                            tr {
                                th { style: "{HEADER_CELL_STYLE}", "Description" }
                                for header in detail_headers.iter() {
                                    th { style: "{HEADER_CELL_STYLE}", "{header}" }
                                }
                                th { style: "{HEADER_CELL_STYLE}", "Qty" }
                                th { style: "{HEADER_CELL_STYLE}", "Line Total" }
                            }
                        }
                        tbody {
                            {lines.into_iter().map(|line| {
                                let TreeLine { row_idx, path, label, indent, has_children, cells, quantity, line_total } = line;
                                let is_selected = selected.as_ref() == Some(&path);
                                let background = if is_selected { "#eef4ff" } else { "transparent" };
                                let marker = if has_children { "▾ " } else { "" };
                                let weight = if has_children { "600" } else { "400" };
                                let is_editing = editing == Some(row_idx);
                                let quantity_for_edit = quantity.clone();
                                rsx!(
                                    tr {
                                        style: "background: {background}; cursor: pointer;",
                                        onclick: move |_| selected_path.set(Some(path.clone())),
                                        td { style: "{CELL_STYLE} padding-left: {indent + 6}px; font-weight: {weight};",
                                            "{marker}{label}"
                                        }
                                        for cell in cells.iter() {
                                            td { style: "{CELL_STYLE}", "{cell}" }
                                        }
                                        if is_editing {
                                            td { style: "{CELL_STYLE} text-align: right;",
                                                input {
                                                    style: "width: 60px;",
                                                    value: editing_value(),
                                                    onclick: move |event| event.stop_propagation(),
                                                    oninput: move |event| editing_value.set(event.value()),
                                                    onkeydown: move |event| {
                                                        if event.key() == Key::Enter {
                                                            let raw = editing_value();
                                                            let result = edit_path_quantity(&mut tree_rows.write(), row_idx, &raw, fields);
                                                            match result {
                                                                Ok(change) => notice.set(Some(change.notice())),
                                                                Err(err) => notice.set(Some(Notice::error(err.to_string()))),
                                                            }
                                                            editing_row.set(None);
                                                        } else if event.key() == Key::Escape {
                                                            editing_row.set(None);
                                                        }
                                                    }
                                                }
                                            }
                                        } else {
                                            td {
                                                style: "{CELL_STYLE} text-align: right; cursor: cell;",
                                                ondoubleclick: move |event| {
                                                    event.stop_propagation();
                                                    editing_row.set(Some(row_idx));
                                                    editing_value.set(quantity_for_edit.clone());
                                                },
                                                "{quantity}"
                                            }
                                        }
                                        td { style: "{CELL_STYLE} text-align: right;", "{line_total}" }
                                    }
                                )
                            })}
                        }
                    }
                }
                div { style: "flex: 1; border: 1px solid #e5e7eb; border-radius: 6px; padding: 8px 12px; background: #fff;",
                    h4 { style: "margin: 0 0 8px 0;", "Direct sub-components" }
                    if selected_label.is_empty() {
                        p { style: "color: #6b7280;", "Select a row to list its sub-components." }
                    } else if children.is_empty() {
                        p { style: "color: #6b7280;", "{selected_label} has no sub-components." }
                    } else {
                        p { style: "color: #6b7280; margin: 0 0 6px 0;", "{selected_label}" }
                        ul { style: "margin: 0; padding-left: 18px;",
                            for (child_label, child_total) in children.iter() {
                                li { "{child_label} ({child_total})" }
                            }
                        }
                    }
                }
            }
        }
    }
}
