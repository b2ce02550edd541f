//! Commission rates service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Failures of commission rate service operations.
#[derive(Debug, Error)]
pub enum CommissionRatesServiceError {
    /// Another rate, active or deleted, already uses the name.
    #[error("commission rate name already exists")]
    AlreadyExists,

    /// No rate has the given identifier.
    #[error("commission rate not found")]
    NotFound,

    /// A required column was null.
    #[error("missing required data")]
    MissingRequiredData,

    /// A check constraint rejected the row.
    #[error("invalid data")]
    InvalidData,

    /// Any other database failure.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CommissionRatesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
