use thiserror::Error;

/// Why an imported (or persisted) byte stream could not become a document.
#[derive(Error, Debug)]
pub enum DeserializeError {
    #[error("invalid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),

    #[error("document does not match the resume shape: {0}")]
    Shape(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Import rejected: {0}")]
    Deserialize(#[from] DeserializeError),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("An import is already in progress")]
    ImportInProgress,

    #[error("Import ticket is no longer valid")]
    StaleImport,

    #[error("Preview error: {0}")]
    Preview(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;
