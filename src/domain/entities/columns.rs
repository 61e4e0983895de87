use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Text,
    Number,
    Date,
}

/// Column configuration shown by the grid and stored as the `headers` of an
/// upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub field: String,
    pub header_name: String,
    pub sortable: bool,
    pub filter: FilterKind,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub pinned_left: bool,
}

impl ColumnDescriptor {
    pub fn text(field: impl Into<String>, header_name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header_name: header_name.into(),
            sortable: true,
            filter: FilterKind::Text,
            editable: false,
            pinned_left: false,
        }
    }

    pub fn number(field: impl Into<String>, header_name: impl Into<String>) -> Self {
        Self {
            filter: FilterKind::Number,
            ..Self::text(field, header_name)
        }
    }

    pub fn date(field: impl Into<String>, header_name: impl Into<String>) -> Self {
        Self {
            filter: FilterKind::Date,
            ..Self::text(field, header_name)
        }
    }

    /// Column for a parsed file header: label is the header text itself.
    pub fn from_header(header: &str) -> Self {
        Self::text(header, header)
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned_left = true;
        self
    }
}

pub fn columns_from_headers<S: AsRef<str>>(headers: &[S]) -> Vec<ColumnDescriptor> {
    headers
        .iter()
        .map(|header| ColumnDescriptor::from_header(header.as_ref()))
        .collect()
}

/// Columns offered by the grid's "Add Column" context menu.
pub fn addable_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::text("manufacturer", "Manufacturer"),
        ColumnDescriptor::text("modelNumber", "Model Number"),
        ColumnDescriptor::text("location", "Location"),
        ColumnDescriptor::text("notes", "Notes"),
    ]
}
