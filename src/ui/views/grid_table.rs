use dioxus::prelude::*;

use crate::domain::entities::columns::{addable_columns, FilterKind};
use crate::domain::entities::record::format_number;
use crate::domain::entities::rows::{GridRow, Totals};
use crate::domain::services::aggregation::{format_currency, line_total};
use crate::ui::state::grid_handle::{
    GridAction, GridEffect, GridHandle, Section, SortKey, PAGE_SIZE_OPTIONS,
};
use crate::usecase::notice::Notice;

const HEADER_CELL_STYLE: &str = "position: sticky; top: 0; z-index: 2; background: #f3f4f6; border: 1px solid #bbb; padding: 6px; text-align: left; white-space: nowrap;";
const CELL_STYLE: &str = "border: 1px solid #ddd; padding: 4px 6px;";
const PINNED_STYLE: &str = "position: sticky; left: 0; z-index: 1; background: #fff;";
const PINNED_HEADER_STYLE: &str = "left: 0; z-index: 3;";

#[derive(Clone, Debug, PartialEq)]
enum DisplayRow {
    Header {
        row_idx: usize,
        label: String,
        color: String,
    },
    Record {
        row_idx: usize,
        cells: Vec<DisplayCell>,
        line_total: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
struct DisplayCell {
    field: String,
    text: String,
    editable: bool,
    pinned: bool,
    align: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
struct HeaderCell {
    field: String,
    label: String,
    sortable: bool,
    pinned: bool,
    filter_text: String,
    filter_hint: &'static str,
    next_sort: Option<SortKey>,
}

/// Header click cycles ascending, descending, unsorted.
fn next_sort(current: Option<&SortKey>, field: &str) -> Option<SortKey> {
    match current {
        Some(sort) if sort.field == field && sort.descending => None,
        Some(sort) if sort.field == field => Some(SortKey {
            field: field.to_string(),
            descending: true,
        }),
        _ => Some(SortKey {
            field: field.to_string(),
            descending: false,
        }),
    }
}

fn header_cells(grid: &GridHandle) -> Vec<HeaderCell> {
    grid.columns()
        .iter()
        .map(|column| {
            let marker = match grid.sort() {
                Some(sort) if sort.field == column.field && sort.descending => " ▼",
                Some(sort) if sort.field == column.field => " ▲",
                _ => "",
            };
            HeaderCell {
                field: column.field.clone(),
                label: format!("{}{marker}", column.header_name),
                sortable: column.sortable,
                pinned: column.pinned_left,
                filter_text: grid.column_filter(&column.field).to_string(),
                filter_hint: match column.filter {
                    FilterKind::Text => "contains",
                    FilterKind::Number => "= / >= / <",
                    FilterKind::Date => "yyyy-mm-dd",
                },
                next_sort: next_sort(grid.sort(), &column.field),
            }
        })
        .collect()
}

fn display_rows(grid: &GridHandle) -> Vec<DisplayRow> {
    grid.page_rows()
        .into_iter()
        .map(|(row_idx, row)| match row {
            GridRow::Group(group) => DisplayRow::Header {
                row_idx,
                label: group.label.clone(),
                color: group.color.clone(),
            },
            GridRow::Record(record) => DisplayRow::Record {
                row_idx,
                cells: grid
                    .columns()
                    .iter()
                    .map(|column| DisplayCell {
                        field: column.field.clone(),
                        text: record.display(&column.field),
                        editable: column.editable,
                        pinned: column.pinned_left,
                        align: if column.filter == FilterKind::Number {
                            "right"
                        } else {
                            "left"
                        },
                    })
                    .collect(),
                line_total: format_currency(line_total(record, grid.pricing())),
            },
        })
        .collect()
}

/// What a grid effect leaves for the view once the handle has been updated.
#[derive(Clone, Debug, PartialEq)]
enum EffectOutcome {
    Nothing,
    Notify(Notice),
    /// Row to scroll to once the page holding it has rendered.
    ScrollAfterRender(usize),
}

fn resolve_effect(effect: GridEffect, grid: &mut GridHandle) -> EffectOutcome {
    match effect {
        GridEffect::None => EffectOutcome::Nothing,
        GridEffect::Notify(next) => EffectOutcome::Notify(next),
        GridEffect::ScrollTo(row_idx) => {
            if let Some(page) = grid.page_of_row(row_idx) {
                grid.apply(GridAction::SetPage(page));
            }
            EffectOutcome::ScrollAfterRender(row_idx)
        }
    }
}

/// Applies a grid effect to the surrounding view: notices go to the status
/// area, scroll requests move to the right page and are queued in
/// `pending_scroll` until that page has rendered.
pub fn handle_effect(
    effect: GridEffect,
    mut grid: Signal<GridHandle>,
    mut notice: Signal<Option<Notice>>,
    mut pending_scroll: Signal<Option<usize>>,
) {
    let outcome = resolve_effect(effect, &mut grid.write());
    match outcome {
        EffectOutcome::Nothing => {}
        EffectOutcome::Notify(next) => notice.set(Some(next)),
        EffectOutcome::ScrollAfterRender(row_idx) => pending_scroll.set(Some(row_idx)),
    }
}

fn scroll_script(row_idx: usize) -> String {
    format!(
        "document.getElementById('grid-row-{row_idx}')?.scrollIntoView({{behavior: 'smooth', block: 'start'}});"
    )
}

#[component]
pub fn TotalsBar(totals: Totals) -> Element {
    let items = format_number(totals.total_items);
    let price = format_currency(totals.total_price);
    let labor = format_currency(totals.total_labor);
    let grand = format_currency(totals.grand_total);

    rsx! {
        div {
            style: "display: flex; gap: 24px; padding: 8px 12px; background: #f9fafb; border: 1px solid #e5e7eb; border-radius: 6px; margin: 8px 0;",
            span { "Total items: {items}" }
            span { "Total price: {price}" }
            span { "Total labor: {labor}" }
            strong { "Grand total: {grand}" }
        }
    }
}

#[component]
pub fn SectionButtons(
    mut grid: Signal<GridHandle>,
    notice: Signal<Option<Notice>>,
    pending_scroll: Signal<Option<usize>>,
) -> Element {
    rsx! {
        div { style: "display: flex; gap: 8px;",
            for (section, label) in Section::ALL.map(|section| (section, section.label())) {
                button {
                    style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        let effect = grid.write().apply(GridAction::ApplySection(section));
                        handle_effect(effect, grid, notice, pending_scroll);
                    },
                    "{label}"
                }
            }
        }
    }
}

#[component]
pub fn GridView(
    mut grid: Signal<GridHandle>,
    notice: Signal<Option<Notice>>,
    show_sections: bool,
) -> Element {
    let mut editing_cell = use_signal(|| None::<(usize, String)>);
    let mut editing_value = use_signal(String::new);
    let mut context_menu = use_signal(|| None::<(f64, f64)>);
    let mut pending_scroll = use_signal(|| None::<usize>);

    // Runs after the render that follows a page change, so the row exists.
    use_effect(move || {
        if let Some(row_idx) = pending_scroll() {
            let _ = dioxus::document::eval(&scroll_script(row_idx));
            pending_scroll.set(None);
        }
    });

    let snapshot = grid.read().clone();
    let rows = display_rows(&snapshot);
    let headers = header_cells(&snapshot);
    let column_count = headers.len() + 1;
    let page = snapshot.page();
    let page_count = snapshot.page_count();
    let page_size = snapshot.page_size();
    let quick_filter = snapshot.quick_filter().to_string();
    let totals = snapshot.totals();
    let editing_snapshot = editing_cell();
    let (menu_left, menu_top) = context_menu().unwrap_or((0.0, 0.0));

    rsx! {
        div {
            onclick: move |_| context_menu.set(None),
            div {
                style: "display: flex; justify-content: space-between; align-items: center; gap: 12px; margin-bottom: 8px;",
                if show_sections {
                    SectionButtons { grid, notice, pending_scroll }
                } else {
                    div {}
                }
                input {
                    style: "width: 240px; padding: 4px 8px;",
                    placeholder: "Search...",
                    value: "{quick_filter}",
                    oninput: move |event| {
                        grid.write().apply(GridAction::SetQuickFilter(event.value()));
                    },
                }
            }

            TotalsBar { totals }

            div {
                style: "max-height: 70vh; overflow: auto;",
                oncontextmenu: move |event| {
                    event.prevent_default();
                    let point = event.client_coordinates();
                    context_menu.set(Some((point.x, point.y)));
                },
                table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                    thead {
                        tr {
                            {headers.iter().map(|header| {
                                let pinned = if header.pinned { PINNED_HEADER_STYLE } else { "" };
                                let cursor = if header.sortable { "pointer" } else { "default" };
                                let sortable = header.sortable;
                                let next = header.next_sort.clone();
                                rsx!(
                                    th {
                                        style: "{HEADER_CELL_STYLE} {pinned} cursor: {cursor};",
                                        onclick: move |_| {
                                            if !sortable {
                                                return;
                                            }
                                            let action = match next.clone() {
                                                Some(SortKey { field, descending }) => {
                                                    GridAction::SortBy { field, descending }
                                                }
                                                None => GridAction::ClearSort,
                                            };
                                            grid.write().apply(action);
                                        },
                                        "{header.label}"
                                    }
                                )
                            })}
                            th { style: "{HEADER_CELL_STYLE}", "Line Total" }
                        }
                        tr {
                            {headers.iter().map(|header| {
                                let pinned = if header.pinned { PINNED_HEADER_STYLE } else { "" };
                                let field = header.field.clone();
                                let value = header.filter_text.clone();
                                let hint = header.filter_hint;
                                rsx!(
                                    th { style: "{HEADER_CELL_STYLE} {pinned} top: 30px; padding: 2px 4px;",
                                        input {
                                            style: "width: 100%; box-sizing: border-box; font-weight: 400;",
                                            placeholder: "{hint}",
                                            value: "{value}",
                                            oninput: move |event| {
                                                grid.write().apply(GridAction::SetColumnFilter {
                                                    field: field.clone(),
                                                    text: event.value(),
                                                });
                                            },
                                        }
                                    }
                                )
                            })}
                            th { style: "{HEADER_CELL_STYLE} top: 30px;" }
                        }
                    }
                    tbody {
                        {rows.into_iter().map(|row| match row {
                            DisplayRow::Header { row_idx, label, color } => rsx!(
                                tr { id: "grid-row-{row_idx}",
                                    td {
                                        colspan: "{column_count}",
                                        style: "background: {color}; font-weight: 600; padding: 6px 8px; border: 1px solid #ddd;",
                                        "{label}"
                                    }
                                }
                            ),
                            DisplayRow::Record { row_idx, cells, line_total } => rsx!(
                                tr { id: "grid-row-{row_idx}",
                                    {cells.into_iter().map(|cell| {
                                        let key = (row_idx, cell.field.clone());
                                        let is_editing = editing_snapshot.as_ref() == Some(&key);
                                        let align = cell.align;
                                        let pinned = if cell.pinned { PINNED_STYLE } else { "" };
                                        if is_editing {
                                            rsx!(
                                                td { style: "{CELL_STYLE} {pinned} text-align: {align};",
                                                    input {
                                                        style: "width: 80px;",
                                                        value: editing_value(),
                                                        oninput: move |event| editing_value.set(event.value()),
                                                        onkeydown: move |event| {
                                                            if event.key() == Key::Enter {
                                                                let effect = grid.write().apply(GridAction::EditQuantity {
                                                                    row: row_idx,
                                                                    value: editing_value(),
                                                                });
                                                                handle_effect(effect, grid, notice, pending_scroll);
                                                                editing_cell.set(None);
                                                                editing_value.set(String::new());
                                                            } else if event.key() == Key::Escape {
                                                                editing_cell.set(None);
                                                                editing_value.set(String::new());
                                                            }
                                                        }
                                                    }
                                                }
                                            )
                                        } else {
                                            let text = cell.text.clone();
                                            let editable = cell.editable;
                                            let cursor = if editable { "cell" } else { "default" };
                                            rsx!(
                                                td {
                                                    style: "{CELL_STYLE} {pinned} text-align: {align}; cursor: {cursor};",
                                                    ondoubleclick: move |_| {
                                                        if editable {
                                                            editing_cell.set(Some(key.clone()));
                                                            editing_value.set(text.clone());
                                                        }
                                                    },
                                                    "{cell.text}"
                                                }
                                            )
                                        }
                                    })}
                                    td { style: "{CELL_STYLE} text-align: right;", "{line_total}" }
                                }
                            ),
                        })}
                    }
                }
            }

            div {
                style: "display: flex; gap: 8px; align-items: center; margin-top: 8px;",
                button {
                    disabled: page == 0,
                    onclick: move |_| {
                        grid.write().apply(GridAction::SetPage(page.saturating_sub(1)));
                    },
                    "Prev"
                }
                span { "Page {page + 1} of {page_count}" }
                button {
                    disabled: page + 1 >= page_count,
                    onclick: move |_| {
                        grid.write().apply(GridAction::SetPage(page + 1));
                    },
                    "Next"
                }
                label { "Page size "
                    select {
                        value: "{page_size}",
                        onchange: move |event| {
                            if let Ok(size) = event.value().parse::<usize>() {
                                grid.write().apply(GridAction::SetPageSize(size));
                            }
                        },
                        for size in PAGE_SIZE_OPTIONS {
                            option { value: "{size}", "{size}" }
                        }
                    }
                }
            }

            if context_menu().is_some() {
                div {
                    style: "position: fixed; left: {menu_left}px; top: {menu_top}px; min-width: 180px; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 4px 0;",
                    onclick: move |event| event.stop_propagation(),
                    div { style: "padding: 6px 10px; color: #6b7280; font-size: 12px;", "Add Column" }
                    {addable_columns().into_iter().map(|column| {
                        let header = column.header_name.clone();
                        rsx!(
                            div {
                                style: "padding: 6px 14px; cursor: pointer;",
                                onclick: move |_| {
                                    grid.write().apply(GridAction::AddColumn(column.clone()));
                                    context_menu.set(None);
                                },
                                "{header}"
                            }
                        )
                    })}
                }
            }
        }
    }
}
