use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("failed to parse {file}: {cause}")]
    Parse { file: String, cause: String },
    #[error("missing required headers: {}", .missing.join(", "))]
    HeaderValidation { missing: Vec<String> },
}
