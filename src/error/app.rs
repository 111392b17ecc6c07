use thiserror::Error;

use super::{ProbeError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn probe<E>(error: E) -> Self
    where
        E: Into<ProbeError>,
    {
        error.into().into()
    }

    /// True when the run was aborted by the pre-flight check rather than by
    /// bad input or a local failure.
    #[must_use]
    pub const fn is_preflight_failure(&self) -> bool {
        matches!(
            self,
            AppError::Probe(
                ProbeError::NodeUnreachable { .. } | ProbeError::UnexpectedStatus { .. }
            )
        )
    }
}
