use crate::core::record::RecordId;
use rusqlite;
use std::io;
use thiserror::Error;

/// Rejections raised by the form before any store call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("type mismatch: {field} must be {expected}, got '{value}'")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Error, Debug)]
pub enum StockroomError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),
    #[error("Not found: no record with id {0}")]
    NotFound(RecordId),
    #[error("Persistence error: {0}")]
    PersistenceError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Form is already closed")]
    FormClosed,
}
