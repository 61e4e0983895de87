use thiserror::Error;

use crate::domain::entities::columns::ColumnDescriptor;
use crate::domain::entities::record::ComponentRecord;
use crate::domain::entities::upload::StagedUpload;

pub const UPLOADS_TABLE: &str = "csv_uploads";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("failed to store upload: {0}")]
    Store(String),
    #[error("an upload is already being submitted")]
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReceipt {
    Inserted { upload_id: i64 },
    /// The upload token was already committed; nothing was written.
    AlreadySubmitted { upload_id: i64 },
}

impl SubmitReceipt {
    pub fn upload_id(&self) -> i64 {
        match self {
            SubmitReceipt::Inserted { upload_id }
            | SubmitReceipt::AlreadySubmitted { upload_id } => *upload_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredUpload {
    pub upload_id: i64,
    pub token: String,
    pub file_name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<ComponentRecord>,
    pub uploaded_at: String,
}

/// Write side of the catalog store. Every submit is a full insert of the
/// staged snapshot.
pub trait PersistenceGateway: Send + Sync {
    fn init(&self) -> Result<(), PersistenceError>;
    fn submit(&self, upload: &StagedUpload) -> Result<SubmitReceipt, PersistenceError>;
    fn latest_upload(&self) -> Result<Option<StoredUpload>, PersistenceError>;
}
