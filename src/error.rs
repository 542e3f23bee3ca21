use thiserror::Error;

/// Failure of a record store operation.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record not found")]
    NotFound,
    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),
}

impl From<sqlx::Error> for RecordError {
    fn from(e: sqlx::Error) -> Self {
        Self::Storage(e.into())
    }
}

impl From<anyhow::Error> for RecordError {
    fn from(e: anyhow::Error) -> Self {
        Self::Storage(e)
    }
}

pub type RecordResult<T> = Result<T, RecordError>;
