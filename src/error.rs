use thiserror::Error;

/// Errors raised by the catalog core. Only record insertion can fail.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid JSON data: {0}")]
    MalformedInputData(#[from] serde_json::Error),
}
