use crate::domain::entities::record::ComponentRecord;

/// Synthetic full-width section header injected between component rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub key: String,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridRow {
    Record(ComponentRecord),
    Group(CategoryGroup),
}

impl GridRow {
    pub fn as_record(&self) -> Option<&ComponentRecord> {
        match self {
            GridRow::Record(record) => Some(record),
            GridRow::Group(_) => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut ComponentRecord> {
        match self {
            GridRow::Record(record) => Some(record),
            GridRow::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&CategoryGroup> {
        match self {
            GridRow::Group(group) => Some(group),
            GridRow::Record(_) => None,
        }
    }

    pub fn is_full_width(&self) -> bool {
        matches!(self, GridRow::Group(_))
    }
}

impl From<ComponentRecord> for GridRow {
    fn from(record: ComponentRecord) -> Self {
        GridRow::Record(record)
    }
}

/// Parent/children form of a hierarchical row.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct NestedRow {
    pub record: ComponentRecord,
    pub children: Vec<NestedRow>,
}

#[allow(dead_code)]
impl NestedRow {
    pub fn leaf(record: ComponentRecord) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Flat form of a hierarchical row; ancestry is encoded by path prefixes.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRow {
    pub record: ComponentRecord,
    pub path: Vec<String>,
}

impl PathRow {
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn label(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    pub fn is_ancestor_of(&self, other: &PathRow) -> bool {
        self.path.len() < other.path.len() && other.path.starts_with(&self.path)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub total_items: f64,
    pub total_price: f64,
    pub total_labor: f64,
    pub grand_total: f64,
}

impl Totals {
    pub fn merge(self, other: Totals) -> Totals {
        let total_price = self.total_price + other.total_price;
        let total_labor = self.total_labor + other.total_labor;
        Totals {
            total_items: self.total_items + other.total_items,
            total_price,
            total_labor,
            grand_total: total_price + total_labor,
        }
    }
}
