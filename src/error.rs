use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("{method}() takes no arguments ({given} given)")]
    UnexpectedArguments { method: String, given: usize },

    #[error("Record has no attribute '{0}'")]
    MissingAttribute(String),

    #[error("Invalid timestamp for '{field}': {value}")]
    InvalidTimestamp { field: String, value: String },

    #[error("Invalid value for '{field}': expected {expected}")]
    InvalidAttribute { field: String, expected: String },

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
