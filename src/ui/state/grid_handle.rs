use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::entities::columns::{ColumnDescriptor, FilterKind};
use crate::domain::entities::record::PricingFields;
use crate::domain::entities::rows::{GridRow, Totals};
use crate::domain::services::aggregation::aggregate;
use crate::domain::services::categories::{
    section_header_index, CategoryBucket, PANEL_SECTIONS, SECTION_FIELD,
};
use crate::domain::services::filters::{column_filter_matches, compare_records};
use crate::usecase::notice::Notice;
use crate::usecase::services::edit_service::edit_quantity;

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 15, 25, 50];
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Navigation buttons above the panelboard grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Main,
    Sub,
    Distribution,
    Lighting,
    Custom,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Main,
        Section::Sub,
        Section::Distribution,
        Section::Lighting,
        Section::Custom,
    ];

    fn bucket(self) -> Option<&'static CategoryBucket> {
        match self {
            Section::Main => Some(&PANEL_SECTIONS[0]),
            Section::Sub => Some(&PANEL_SECTIONS[1]),
            Section::Distribution => Some(&PANEL_SECTIONS[2]),
            Section::Lighting => Some(&PANEL_SECTIONS[3]),
            Section::Custom => None,
        }
    }

    pub fn label(self) -> &'static str {
        self.bucket().map(|bucket| bucket.label).unwrap_or("Custom")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityFilter {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridAction {
    AddColumn(ColumnDescriptor),
    SetQuickFilter(String),
    /// Empty text clears the column's filter.
    SetColumnFilter { field: String, text: String },
    SortBy { field: String, descending: bool },
    ClearSort,
    ApplySection(Section),
    SetPage(usize),
    SetPageSize(usize),
    EditQuantity { row: usize, value: String },
    ReplaceData {
        columns: Vec<ColumnDescriptor>,
        rows: Vec<GridRow>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridEffect {
    None,
    /// Bring the row with this index (into the handle's rows) into view.
    ScrollTo(usize),
    Notify(Notice),
}

/// Explicit grid state: every read or mutation of the visible rows, filters
/// and paging goes through this handle.
#[derive(Debug, Clone, PartialEq)]
pub struct GridHandle {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<GridRow>,
    pricing: PricingFields,
    quick_filter: String,
    filter: Option<EqualityFilter>,
    column_filters: BTreeMap<String, String>,
    sort: Option<SortKey>,
    page: usize,
    page_size: usize,
    totals: Totals,
}

impl GridHandle {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<GridRow>, pricing: PricingFields) -> Self {
        let totals = aggregate(&rows, pricing);
        Self {
            columns,
            rows,
            pricing,
            quick_filter: String::new(),
            filter: None,
            column_filters: BTreeMap::new(),
            sort: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            totals,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        if PAGE_SIZE_OPTIONS.contains(&page_size) {
            self.page_size = page_size;
        }
        self
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn pricing(&self) -> PricingFields {
        self.pricing
    }

    pub fn quick_filter(&self) -> &str {
        &self.quick_filter
    }

    pub fn filter(&self) -> Option<&EqualityFilter> {
        self.filter.as_ref()
    }

    pub fn column_filter(&self, field: &str) -> &str {
        self.column_filters
            .get(field)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn apply(&mut self, action: GridAction) -> GridEffect {
        debug!(?action, "grid action");
        match action {
            GridAction::AddColumn(descriptor) => {
                if self.columns.iter().any(|column| column.field == descriptor.field) {
                    return GridEffect::None;
                }
                self.columns.push(descriptor);
                GridEffect::None
            }
            GridAction::SetQuickFilter(text) => {
                self.quick_filter = text;
                self.page = 0;
                GridEffect::None
            }
            GridAction::SetColumnFilter { field, text } => {
                if text.trim().is_empty() {
                    self.column_filters.remove(&field);
                } else {
                    self.column_filters.insert(field, text);
                }
                self.page = 0;
                GridEffect::None
            }
            GridAction::SortBy { field, descending } => {
                if self.column(&field).is_some_and(|column| column.sortable) {
                    self.sort = Some(SortKey { field, descending });
                    self.page = 0;
                }
                GridEffect::None
            }
            GridAction::ClearSort => {
                self.sort = None;
                GridEffect::None
            }
            GridAction::ApplySection(section) => self.apply_section(section),
            GridAction::SetPage(page) => {
                self.page = page.min(self.page_count() - 1);
                GridEffect::None
            }
            GridAction::SetPageSize(page_size) => {
                if PAGE_SIZE_OPTIONS.contains(&page_size) {
                    self.page_size = page_size;
                    self.page = 0;
                }
                GridEffect::None
            }
            GridAction::EditQuantity { row, value } => {
                match edit_quantity(&mut self.rows, row, &value, self.pricing) {
                    Ok(change) => {
                        self.totals = change.totals;
                        GridEffect::Notify(change.notice())
                    }
                    Err(err) => GridEffect::Notify(Notice::error(err.to_string())),
                }
            }
            GridAction::ReplaceData { columns, rows } => {
                self.columns = columns;
                self.rows = rows;
                self.filter = None;
                self.quick_filter.clear();
                self.column_filters.clear();
                self.sort = None;
                self.page = 0;
                self.totals = aggregate(&self.rows, self.pricing);
                GridEffect::None
            }
        }
    }

    fn apply_section(&mut self, section: Section) -> GridEffect {
        self.page = 0;
        let Some(bucket) = section.bucket() else {
            self.filter = None;
            return GridEffect::None;
        };
        self.filter = Some(EqualityFilter {
            field: SECTION_FIELD.to_string(),
            value: bucket.filter_value.to_string(),
        });
        section_header_index(&self.rows, bucket.key)
            .map(GridEffect::ScrollTo)
            .unwrap_or(GridEffect::None)
    }

    fn column(&self, field: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.field == field)
    }

    fn column_kind(&self, field: &str) -> FilterKind {
        self.column(field)
            .map(|column| column.filter)
            .unwrap_or(FilterKind::Text)
    }

    fn record_passes(&self, row: &GridRow) -> bool {
        let Some(record) = row.as_record() else {
            return false;
        };
        let filter_ok = self
            .filter
            .as_ref()
            .map(|filter| record.display(&filter.field) == filter.value)
            .unwrap_or(true);
        let columns_ok = self.column_filters.iter().all(|(field, text)| {
            column_filter_matches(self.column_kind(field), record, field, text)
        });
        filter_ok && columns_ok && record.matches_text(&self.quick_filter)
    }

    fn is_filtered(&self) -> bool {
        self.filter.is_some()
            || !self.quick_filter.trim().is_empty()
            || !self.column_filters.is_empty()
    }

    fn flush_segment<'a>(
        &self,
        visible: &mut Vec<(usize, &'a GridRow)>,
        segment: &mut Vec<(usize, &'a GridRow)>,
    ) {
        if let Some(sort) = &self.sort {
            let kind = self.column_kind(&sort.field);
            segment.sort_by(|(_, a), (_, b)| match (a.as_record(), b.as_record()) {
                (Some(a), Some(b)) => {
                    let ordering = compare_records(kind, a, b, &sort.field);
                    if sort.descending {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                }
                _ => std::cmp::Ordering::Equal,
            });
        }
        visible.append(segment);
    }

    /// Rows left after filtering, with their index into [`GridHandle::rows`].
    /// While a filter is active a section header is only kept when at least one
    /// of its members is. Sorting reorders records within their section.
    pub fn visible_rows(&self) -> Vec<(usize, &GridRow)> {
        let filtered = self.is_filtered();
        let mut visible = Vec::new();
        let mut segment = Vec::new();
        let mut pending_header = None;
        for (idx, row) in self.rows.iter().enumerate() {
            if row.is_full_width() {
                self.flush_segment(&mut visible, &mut segment);
                if filtered {
                    pending_header = Some((idx, row));
                } else {
                    visible.push((idx, row));
                }
                continue;
            }
            if self.record_passes(row) {
                if let Some(header) = pending_header.take() {
                    visible.push(header);
                }
                segment.push((idx, row));
            }
        }
        self.flush_segment(&mut visible, &mut segment);
        visible
    }

    pub fn page_count(&self) -> usize {
        self.visible_rows().len().div_ceil(self.page_size).max(1)
    }

    pub fn page_rows(&self) -> Vec<(usize, &GridRow)> {
        self.visible_rows()
            .into_iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// Page holding the row at `row_idx`, if it is visible.
    pub fn page_of_row(&self, row_idx: usize) -> Option<usize> {
        self.visible_rows()
            .iter()
            .position(|(idx, _)| *idx == row_idx)
            .map(|position| position / self.page_size)
    }
}
