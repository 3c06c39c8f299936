//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidInput`] thrown when a required field is missing or malformed.
//! - [`InvalidAmount`] thrown when a monetary value breaks its constraint.
//! - [`Forbidden`] thrown when the caller is not allowed on a canvas.
//! - [`KeyNotFound`] thrown when an item is not found.
//!
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    InvalidId(String),
    #[error("{0}")]
    InvalidAmount(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Maps a unique-constraint violation on insert/update to
    /// [`EngineError::ExistingKey`], anything else to
    /// [`EngineError::Database`].
    pub(crate) fn on_write(err: DbErr, key: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::ExistingKey(key.into()),
            _ => Self::Database(err),
        }
    }

    pub(crate) fn access_denied() -> Self {
        Self::Forbidden("Access denied".to_string())
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
