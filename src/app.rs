use std::sync::Arc;

use dioxus::prelude::*;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::domain::entities::rows::GridRow;
use crate::infra::sqlite::repo::SqliteGateway;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::{AppState, View};
use crate::ui::state::grid_handle::GridAction;
use crate::ui::views::grid_table::GridView;
use crate::ui::views::star_delta::StarDeltaView;
use crate::ui::views::upload::ComponentsUpload;
use crate::usecase::notice::{Notice, NoticeLevel};
use crate::usecase::ports::repo::PersistenceGateway;
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::upload_service::UploadService;

const TAB_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 6px 12px; border-radius: 6px; cursor: pointer;";
const ACTIVE_TAB_STYLE: &str = "border: 1px solid #1d4ed8; background: #2563eb; color: #fff; padding: 6px 12px; border-radius: 6px; cursor: pointer;";

/// Services shared by every view, provided once at the root.
#[derive(Clone)]
pub struct Services {
    pub import: Arc<ImportService>,
    pub upload: Arc<UploadService>,
}

impl Services {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            import: Arc::new(ImportService::default()),
            upload: Arc::new(UploadService::new(gateway)),
        }
    }
}

fn notice_colors(level: NoticeLevel) -> (&'static str, &'static str) {
    match level {
        NoticeLevel::Info => ("#eff6ff", "#1d4ed8"),
        NoticeLevel::Success => ("#ecfdf5", "#047857"),
        NoticeLevel::Error => ("#fef2f2", "#b91c1c"),
    }
}

#[component]
fn NoticeBanner(mut notice: Signal<Option<Notice>>) -> Element {
    let Some(current) = notice() else {
        return rsx! {};
    };
    let (background, color) = notice_colors(current.level);

    rsx! {
        div {
            style: "display: flex; justify-content: space-between; align-items: flex-start; gap: 12px; padding: 8px 12px; margin-bottom: 10px; border-radius: 6px; background: {background}; color: {color}; border: 1px solid {color};",
            div {
                strong { "{current.title}" }
                div { "{current.description}" }
            }
            button {
                style: "border: none; background: transparent; color: {color}; cursor: pointer; font-size: 16px;",
                onclick: move |_| notice.set(None),
                "×"
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let services = use_context_provider(|| {
        let gateway: Arc<dyn PersistenceGateway> =
            Arc::new(SqliteGateway::new(config.db_path.clone()));
        Services::new(gateway)
    });

    let AppState {
        mut active_view,
        panel_grid,
        category_grid,
        tree_rows,
        selected_path,
        mut upload_grid,
        staged,
        mut stored_file,
        show_confirm,
        mut busy,
        mut notice,
    } = AppState::new(config.page_size);

    let upload_service = services.upload.clone();
    use_effect(move || {
        busy.set(true);
        let loaded = run_blocking("load_catalog", || {
            upload_service.init_store()?;
            upload_service.latest()
        });
        match loaded {
            Ok(Some(stored)) => {
                info!(
                    upload_id = stored.upload_id,
                    rows = stored.rows.len(),
                    "loaded stored catalog"
                );
                upload_grid.write().apply(GridAction::ReplaceData {
                    columns: stored.columns,
                    rows: stored.rows.into_iter().map(GridRow::Record).collect(),
                });
                stored_file.set(Some(stored.file_name));
            }
            Ok(None) => {}
            Err(err) => {
                error!("{err}");
                notice.set(Some(Notice::error(format!(
                    "Failed to open the catalog store: {err}"
                ))));
            }
        }
        busy.set(false);
    });

    let current_view = active_view();
    let tabs = View::ALL.map(|view| {
        let style = if view == current_view {
            ACTIVE_TAB_STYLE
        } else {
            TAB_STYLE
        };
        (view, view.label(), style)
    });

    rsx! {
        div {
            style: "font-family: system-ui, sans-serif; padding: 12px; background: #f8fafc; min-height: 100vh;",
            nav { style: "display: flex; gap: 6px; margin-bottom: 10px;",
                for (view, label, style) in tabs {
                    button {
                        style: "{style}",
                        onclick: move |_| active_view.set(view),
                        "{label}"
                    }
                }
            }

            NoticeBanner { notice }

            {match current_view {
                View::Panelboard => rsx! {
                    GridView { grid: panel_grid, notice, show_sections: true }
                },
                View::Categories => rsx! {
                    GridView { grid: category_grid, notice, show_sections: true }
                },
                View::StarDelta => rsx! {
                    StarDeltaView { tree_rows, selected_path, notice }
                },
                View::Upload => rsx! {
                    ComponentsUpload { upload_grid, staged, stored_file, show_confirm, busy, notice }
                },
            }}
        }
    }
}
