use dioxus::prelude::*;
use rfd::FileDialog;

use crate::app::Services;
use crate::domain::entities::rows::GridRow;
use crate::domain::entities::upload::StagedUpload;
use crate::domain::services::headers::REQUIRED_HEADERS;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::grid_handle::{GridAction, GridHandle};
use crate::ui::views::grid_table::GridView;
use crate::usecase::notice::Notice;
use crate::usecase::services::import_service::staging_notice;
use crate::usecase::services::upload_service::submit_notice;

const BUTTON_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 6px 12px; border-radius: 6px; cursor: pointer;";
const PRIMARY_BUTTON_STYLE: &str = "border: 1px solid #1d4ed8; background: #2563eb; color: #fff; padding: 6px 12px; border-radius: 6px; cursor: pointer;";

fn replace_grid(mut grid: Signal<GridHandle>, staged: &StagedUpload) {
    grid.write().apply(GridAction::ReplaceData {
        columns: staged.columns.clone(),
        rows: staged.rows.iter().cloned().map(GridRow::Record).collect(),
    });
}

/// Pick a catalog file, review the parsed rows, then confirm to replace the
/// stored catalog.
#[component]
pub fn ComponentsUpload(
    upload_grid: Signal<GridHandle>,
    mut staged: Signal<Option<StagedUpload>>,
    mut stored_file: Signal<Option<String>>,
    mut show_confirm: Signal<bool>,
    mut busy: Signal<bool>,
    mut notice: Signal<Option<Notice>>,
) -> Element {
    let services = use_context::<Services>();
    let import_service = services.import.clone();
    let upload_service = services.upload.clone();
    let upload_service_for_state = services.upload.clone();

    let staged_summary = staged
        .read()
        .as_ref()
        .map(|upload| (upload.file_name.clone(), upload.row_count()));
    let in_flight = busy() || upload_service_for_state.is_in_flight();
    let can_upload = staged_summary.is_some() && !in_flight;
    let status_line = match (&staged_summary, stored_file()) {
        (Some((file_name, rows)), _) => format!("Staged: {file_name} ({rows} rows)"),
        (None, Some(file_name)) => format!("Stored: {file_name}"),
        (None, None) => String::new(),
    };
    let confirm_detail = staged_summary
        .as_ref()
        .map(|(file_name, rows)| format!("{rows} rows from \"{file_name}\" will be stored."))
        .unwrap_or_default();
    let required = REQUIRED_HEADERS.join(", ");

    let choose_file = move |_: MouseEvent| {
        let Some(file_path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("Excel", &["xlsx", "xlsm", "xls", "ods"])
            .pick_file()
        else {
            return;
        };

        busy.set(true);
        let result = run_blocking("stage_file", || import_service.stage_file(&file_path));
        notice.set(Some(staging_notice(&result)));
        match result {
            Ok(upload) => {
                replace_grid(upload_grid, &upload);
                staged.set(Some(upload));
            }
            Err(_) => staged.set(None),
        }
        busy.set(false);
    };

    let confirm_upload = move |_: MouseEvent| {
        show_confirm.set(false);
        let Some(upload) = staged.read().clone() else {
            return;
        };

        busy.set(true);
        let result = run_blocking("submit_upload", || upload_service.confirm(&upload));
        notice.set(Some(submit_notice(&upload.file_name, &result)));
        if result.is_ok() {
            stored_file.set(Some(upload.file_name.clone()));
            staged.set(None);
        }
        busy.set(false);
    };

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 12px;",
            div { style: "border: 1px solid #e5e7eb; border-radius: 6px; padding: 10px 12px; background: #fff;",
                h3 { style: "margin: 0 0 6px 0;", "Upload Components" }
                p { style: "margin: 0 0 6px 0; color: #374151;", "The file must contain these columns:" }
                p { style: "margin: 0; font-family: monospace; font-size: 12px; color: #6b7280;", "{required}" }
            }

            div { style: "display: flex; gap: 8px; align-items: center;",
                button {
                    style: "{BUTTON_STYLE}",
                    disabled: in_flight,
                    onclick: choose_file,
                    "Choose CSV File"
                }
                button {
                    style: "{PRIMARY_BUTTON_STYLE}",
                    disabled: !can_upload,
                    onclick: move |_| show_confirm.set(true),
                    "Upload to Database"
                }
                if in_flight {
                    span { style: "color: #6b7280;", "Working..." }
                }
                span { style: "color: #6b7280;", "{status_line}" }
            }

            GridView { grid: upload_grid, notice, show_sections: false }

            if show_confirm() {
                div {
                    style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1500;",
                    div {
                        style: "background: #fff; border-radius: 10px; padding: 18px 20px; min-width: 360px; box-shadow: 0 10px 24px rgba(0,0,0,0.2);",
                        h3 { style: "margin: 0 0 8px 0;", "Replace catalog data?" }
                        p { "{confirm_detail}" }
                        p { style: "color: #b91c1c;", "This will replace the existing data." }
                        div { style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 12px;",
                            button {
                                style: "{BUTTON_STYLE}",
                                onclick: move |_| show_confirm.set(false),
                                "Cancel"
                            }
                            button {
                                style: "{PRIMARY_BUTTON_STYLE}",
                                disabled: in_flight,
                                onclick: confirm_upload,
                                "Confirm Data Update"
                            }
                        }
                    }
                }
            }
        }
    }
}
