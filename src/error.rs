use thiserror::Error;

pub type QuoteResult<T> = Result<T, QuoteError>;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No item with SL No. {0}")]
    NotFound(u32),

    #[error("Workbook decode error: {0}")]
    Decode(String),

    #[error("Workbook export error: {0}")]
    Export(String),
}
