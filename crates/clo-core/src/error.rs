use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloError {
    #[error("not initialized: run 'clo init'")]
    NotInitialized,

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("history record not found: {0}")]
    RecordNotFound(u64),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl CloError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CloError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CloError>;
