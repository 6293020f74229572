use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeederError>;

#[derive(Error, Debug)]
pub enum SeederError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::error::StorageError),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
