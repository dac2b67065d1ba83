//! Error types for the API layer.

use thiserror::Error;

/// Failure of a single API call.
///
/// Transport failures never carry server detail; status failures carry it
/// when the response body had the structured `{detail}` shape.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}")]
    Status { status: u16, detail: Option<String> },
}

impl ApiError {
    /// Server-provided error detail, if the response carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            ApiError::Transport(_) => None,
        }
    }
}
