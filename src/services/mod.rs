use thiserror::Error;

use crate::forms::FormError;
use crate::repository::RepositoryError;

pub mod choices;
pub mod products;
pub mod users;

/// Result alias returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures reported to the HTTP layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or out-of-range input; carries the offending field names.
    #[error("invalid fields: {}", .0.join(", "))]
    Validation(Vec<String>),
    /// A tag or identifier already exists.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The requested username is already registered.
    #[error("user already exists")]
    DuplicateUser,
    #[error("not found")]
    NotFound,
    /// Unknown user or wrong password; the two are never distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Storage or hashing failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(message) => ServiceError::Conflict(message),
            RepositoryError::InvalidValue(field) => {
                ServiceError::Validation(vec![field.to_string()])
            }
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(value: FormError) -> Self {
        match value {
            FormError::InvalidFields(fields) => ServiceError::Validation(fields),
        }
    }
}
