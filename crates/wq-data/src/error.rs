//! Dataset loading errors

use thiserror::Error;

use crate::path::PathError;

/// Errors raised while loading a dataset file
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path data for region '{region}': {source}")]
    InvalidPath {
        region: String,
        #[source]
        source: PathError,
    },

    #[error("Invalid viewBox: {0}")]
    InvalidViewBox(String),
}
