use thiserror::Error;

use crate::models::CategoryStatus;
use crate::services::lifecycle::CategoryAction;
use crate::services::weights::WeightError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid weights: {0}")]
    InvalidWeights(#[from] WeightError),

    #[error("Cannot {action} a category in {from} state")]
    InvalidTransition {
        from: CategoryStatus,
        action: CategoryAction,
    },

    #[error("Category is {status}; {operation} is not allowed")]
    InvalidState {
        status: CategoryStatus,
        operation: &'static str,
    },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Map a raw unique/foreign-key violation to `ConstraintViolation`,
    /// leaving every other error untouched.
    pub fn into_constraint(self, message: &str) -> Self {
        if self.is_unique_violation() || self.is_foreign_key_violation() {
            StorageError::ConstraintViolation(message.to_string())
        } else {
            self
        }
    }
}
