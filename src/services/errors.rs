use thiserror::Error;

use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not authorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    /// Duplicate value reported by the backend for a specific form field.
    #[error("conflict on {field}: {message}")]
    Conflict {
        field: &'static str,
        message: String,
    },

    /// Business error with a message meant for the user.
    #[error("backend rejected the request: {0}")]
    Backend(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Unauthorized => ServiceError::Unauthorized,
            RepositoryError::Conflict(message) => ServiceError::Backend(message),
            RepositoryError::Api { message, .. } => ServiceError::Backend(message),
            RepositoryError::ValidationError(message) => ServiceError::TypeConstraint(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl ServiceError {
    /// Converts a repository conflict into a field-level error, leaving other
    /// errors to the default mapping.
    pub fn conflict_on(field: &'static str, message: &str) -> impl FnOnce(RepositoryError) -> Self {
        move |err| match err {
            RepositoryError::Conflict(_) => ServiceError::Conflict {
                field,
                message: message.to_string(),
            },
            other => ServiceError::from(other),
        }
    }
}
