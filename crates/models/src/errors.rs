use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::warn;

/// Client-facing text for a unique index violation; driver output stays in the logs.
pub const UNIQUE_VIOLATION_MESSAGE: &str = "Student ID or email already exists";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                warn!(%detail, "unique constraint violated");
                ModelError::Conflict(UNIQUE_VIOLATION_MESSAGE.to_string())
            }
            _ => ModelError::Db(e.to_string()),
        }
    }
}
