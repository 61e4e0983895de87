use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::domain::entities::columns::ColumnDescriptor;
use crate::domain::entities::record::ComponentRecord;

/// Idempotency key of one staged upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadToken(pub Uuid);

impl UploadToken {
    pub fn generate() -> Self {
        UploadToken(Uuid::new_v4())
    }
}

impl std::fmt::Display for UploadToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parsed and validated rows awaiting the user's confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedUpload {
    pub token: UploadToken,
    pub file_name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<ComponentRecord>,
    pub staged_at: DateTime<Local>,
}

impl StagedUpload {
    pub fn new(
        file_name: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
        rows: Vec<ComponentRecord>,
    ) -> Self {
        Self {
            token: UploadToken::generate(),
            file_name: file_name.into(),
            columns,
            rows,
            staged_at: Local::now(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
