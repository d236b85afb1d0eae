//! Auth service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::auth::ApiTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token not found")]
    NotFound,

    #[error("user not found")]
    UnknownUser,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[from] ApiTokenError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(|e| e.kind()) {
            Some(ErrorKind::ForeignKeyViolation) => Self::UnknownUser,
            _ => Self::Sql(error),
        }
    }
}
