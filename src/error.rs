//! Error types for the time budget computation

use thiserror::Error;

/// Errors raised by the host-facing JSON entry points.
///
/// The typed API never fails: statistically undefined values are carried as
/// NaN inside the result table instead.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}
