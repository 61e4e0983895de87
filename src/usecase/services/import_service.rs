use std::path::Path;

use tracing::{info, warn};

use crate::domain::entities::columns::columns_from_headers;
use crate::domain::entities::upload::StagedUpload;
use crate::domain::errors::IngestError;
use crate::domain::services::headers::{validate_headers, REQUIRED_HEADERS};
use crate::infra::import::{is_spreadsheet, read_table};
use crate::usecase::notice::Notice;

/// Parses a picked file and stages it for confirmation. Nothing is written
/// here; staging is all-or-nothing over the required header set.
pub struct ImportService {
    required_headers: &'static [&'static str],
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new(&REQUIRED_HEADERS)
    }
}

impl ImportService {
    pub fn new(required_headers: &'static [&'static str]) -> Self {
        Self { required_headers }
    }

    pub fn stage_file(&self, path: &Path) -> Result<StagedUpload, IngestError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("upload.csv")
            .to_string();

        let table = read_table(path).map_err(|err| IngestError::Parse {
            file: file_name.clone(),
            cause: format!("{err:#}"),
        })?;

        if let Err(err) = validate_headers(self.required_headers, &table.headers) {
            warn!(file = %file_name, "{err}");
            return Err(err);
        }

        let columns = columns_from_headers(&table.headers);
        let staged = StagedUpload::new(file_name, columns, table.rows);
        info!(
            file = %staged.file_name,
            rows = staged.row_count(),
            token = %staged.token,
            "staged upload"
        );
        Ok(staged)
    }
}

/// "Excel" for spreadsheet uploads, "CSV" for everything else; used in notices.
pub fn source_kind(file_name: &str) -> &'static str {
    if is_spreadsheet(Path::new(file_name)) {
        "Excel"
    } else {
        "CSV"
    }
}

pub fn staging_notice(result: &Result<StagedUpload, IngestError>) -> Notice {
    match result {
        Ok(staged) => Notice::success(format!(
            "{} file \"{}\" processed: {} rows ready to upload",
            source_kind(&staged.file_name),
            staged.file_name,
            staged.row_count()
        )),
        Err(IngestError::HeaderValidation { missing }) => Notice::error(format!(
            "Missing required headers: {}",
            missing.join(", ")
        )),
        Err(IngestError::Parse { file, cause }) => Notice::error(format!(
            "Failed to parse {} file \"{file}\": {cause}",
            source_kind(file)
        )),
    }
}
