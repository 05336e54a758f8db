//! Error handling for the terminal host

use quiz_core::{RouteError, StoreError};
use thiserror::Error;

/// Host error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),
}

/// Result type alias for host operations
pub type Result<T> = std::result::Result<T, AppError>;
