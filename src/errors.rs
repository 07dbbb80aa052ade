//! Unified application error type.
//! All modules (core, db, cli, utils) return AppError to keep the error
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
    // Local cache
    // ---------------------------
    #[error("Cache database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Cache migration error: {0}")]
    Migration(String),

    #[error("Corrupted cache data: {0}")]
    CacheCorrupt(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid entry type: {0}")]
    InvalidEntryType(String),

    // ---------------------------
    // Mutation errors
    // ---------------------------
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Sync error: {0}")]
    Sync(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(s) if s.as_u16() == 401 || s.as_u16() == 403 => AppError::Auth(e.to_string()),
            Some(s) if s.as_u16() == 404 => AppError::NotFound(e.to_string()),
            _ => AppError::Network(e.to_string()),
        }
    }
}

impl AppError {
    /// Failures the caregiver can retry once the network or session is back.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Auth(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
