use axum::http::StatusCode;
use thiserror::Error;

use crate::{domain::ValidationError, repositories::RepositoryError};

/// Failures of the order workflow. Every variant carries a message that is
/// safe to show to the caller; storage errors are logged, never surfaced raw.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Transaction(String),
}

impl OrderError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) | Self::Transaction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::Unauthorized(message)
            | Self::Internal(message)
            | Self::Transaction(message) => message,
        }
    }
}

impl From<ValidationError> for OrderError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

impl From<RepositoryError> for OrderError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidId(id) => Self::Validation(format!("Invalid id '{id}'")),
            RepositoryError::NotFound => Self::NotFound("Record not found".into()),
            RepositoryError::Transaction(reason) => {
                tracing::error!("Transaction failed: {reason}");
                Self::Transaction("Order transaction failed".into())
            }
            other => {
                tracing::error!("{other}");
                Self::Internal("Could not create an order".into())
            }
        }
    }
}
