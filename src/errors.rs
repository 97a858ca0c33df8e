//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Validation / logic errors
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No member found with id {0}")]
    MemberNotFound(i64),

    #[error("No trainer found with id {0}")]
    TrainerNotFound(i64),

    #[error("No training found with id {0}")]
    TrainingNotFound(i64),

    #[error("Trainer {0} is still assigned to {1} training(s) and cannot be deleted")]
    TrainerReferenced(i64, usize),

    #[error("Logo file is too large ({0} bytes, limit is {1} bytes)")]
    LogoTooLarge(u64, u64),

    #[error("No logo is stored")]
    LogoNotSet,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Import / export errors
    // ---------------------------
    #[error("Import error: {0}")]
    Import(String),

    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
