use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::record::PricingFields;
use crate::domain::entities::rows::{GridRow, PathRow};
use crate::domain::entities::upload::StagedUpload;
use crate::domain::sample_data::{
    panelboard_columns, panelboard_components, star_delta_main, star_delta_subparts,
};
use crate::domain::services::categories::{group_by_category, PANEL_SECTIONS, SECTION_FIELD};
use crate::domain::services::hierarchy::{derive_path_flattened, DEFAULT_LABEL_FIELD};
use crate::ui::state::grid_handle::GridHandle;
use crate::usecase::notice::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Panelboard,
    Categories,
    StarDelta,
    Upload,
}

impl View {
    pub const ALL: [View; 4] = [View::Panelboard, View::Categories, View::StarDelta, View::Upload];

    pub fn label(self) -> &'static str {
        match self {
            View::Panelboard => "Panelboard Grid",
            View::Categories => "By Category",
            View::StarDelta => "Star-Delta Tree",
            View::Upload => "Upload Components",
        }
    }
}

pub struct AppState {
    pub active_view: Signal<View>,
    pub panel_grid: Signal<GridHandle>,
    pub category_grid: Signal<GridHandle>,
    pub tree_rows: Signal<Vec<PathRow>>,
    pub selected_path: Signal<Option<Vec<String>>>,
    pub upload_grid: Signal<GridHandle>,
    pub staged: Signal<Option<StagedUpload>>,
    pub stored_file: Signal<Option<String>>,
    pub show_confirm: Signal<bool>,
    pub busy: Signal<bool>,
    pub notice: Signal<Option<Notice>>,
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            active_view: use_signal(|| View::Panelboard),
            panel_grid: use_signal(|| {
                let rows = panelboard_components()
                    .into_iter()
                    .map(GridRow::Record)
                    .collect();
                GridHandle::new(panelboard_columns(), rows, PricingFields::CATALOG)
                    .with_page_size(page_size)
            }),
            category_grid: use_signal(|| {
                let rows =
                    group_by_category(&panelboard_components(), &PANEL_SECTIONS, SECTION_FIELD);
                GridHandle::new(panelboard_columns(), rows, PricingFields::CATALOG)
                    .with_page_size(page_size)
            }),
            tree_rows: use_signal(|| {
                derive_path_flattened(
                    &star_delta_main(),
                    &star_delta_subparts(),
                    DEFAULT_LABEL_FIELD,
                )
            }),
            selected_path: use_signal(|| None::<Vec<String>>),
            upload_grid: use_signal(|| {
                GridHandle::new(Vec::new(), Vec::new(), PricingFields::IMPORTED)
                    .with_page_size(page_size)
            }),
            staged: use_signal(|| None::<StagedUpload>),
            stored_file: use_signal(|| None::<String>),
            show_confirm: use_signal(|| false),
            busy: use_signal(|| false),
            notice: use_signal(|| None::<Notice>),
        }
    }
}
