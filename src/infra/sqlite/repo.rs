use std::path::PathBuf;

use crate::domain::entities::upload::StagedUpload;
use crate::infra::sqlite::queries::{insert_upload, latest_upload};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{
    PersistenceError, PersistenceGateway, StoredUpload, SubmitReceipt,
};

/// Local SQLite stand-in for the hosted `csv_uploads` table.
pub struct SqliteGateway {
    pub db_path: PathBuf,
}

impl SqliteGateway {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

fn store_error(err: anyhow::Error) -> PersistenceError {
    PersistenceError::Store(format!("{err:#}"))
}

impl PersistenceGateway for SqliteGateway {
    fn init(&self) -> Result<(), PersistenceError> {
        init_db(&self.db_path).map_err(store_error)
    }

    fn submit(&self, upload: &StagedUpload) -> Result<SubmitReceipt, PersistenceError> {
        insert_upload(&self.db_path, upload).map_err(store_error)
    }

    fn latest_upload(&self) -> Result<Option<StoredUpload>, PersistenceError> {
        latest_upload(&self.db_path).map_err(store_error)
    }
}
