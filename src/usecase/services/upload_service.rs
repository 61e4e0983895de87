use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use crate::domain::entities::upload::StagedUpload;
use crate::usecase::notice::Notice;
use crate::usecase::services::import_service::source_kind;
use crate::usecase::ports::repo::{
    PersistenceError, PersistenceGateway, StoredUpload, SubmitReceipt,
};

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Submits confirmed uploads, at most one at a time. The staged snapshot is
/// only borrowed so a failed submit can be retried as is.
pub struct UploadService {
    gateway: Arc<dyn PersistenceGateway>,
    in_flight: AtomicBool,
}

impl UploadService {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            gateway,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn confirm(&self, staged: &StagedUpload) -> Result<SubmitReceipt, PersistenceError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PersistenceError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let result = self.gateway.submit(staged);
        match &result {
            Ok(receipt) => info!(
                file = %staged.file_name,
                token = %staged.token,
                upload_id = receipt.upload_id(),
                "upload stored"
            ),
            Err(err) => error!(file = %staged.file_name, token = %staged.token, "{err}"),
        }
        result
    }

    pub fn init_store(&self) -> Result<(), PersistenceError> {
        self.gateway.init()
    }

    pub fn latest(&self) -> Result<Option<StoredUpload>, PersistenceError> {
        self.gateway.latest_upload()
    }
}

pub fn submit_notice(file_name: &str, result: &Result<SubmitReceipt, PersistenceError>) -> Notice {
    let kind = source_kind(file_name);
    match result {
        Ok(SubmitReceipt::Inserted { .. }) => Notice::success(format!(
            "{kind} file \"{file_name}\" uploaded and processed successfully"
        )),
        Ok(SubmitReceipt::AlreadySubmitted { .. }) => {
            Notice::info(format!("{kind} file \"{file_name}\" was already uploaded"))
        }
        Err(PersistenceError::InFlight) => {
            Notice::info("An upload is already in progress, please wait")
        }
        Err(PersistenceError::Store(_)) => Notice::error(format!("Failed to store {kind} data")),
    }
}
