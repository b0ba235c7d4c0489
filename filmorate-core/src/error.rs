use filmorate_model::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Client-supplied data violated a field constraint. The message is the
    /// exact text surfaced in the HTTP 400 body.
    #[error("{0}")]
    Validation(String),

    /// A referenced id does not exist in its store.
    #[error("entity not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Validation(err.0)
    }
}
