//! Core error types for focusmate-core.
//!
//! The ranking engine and the focus selector are infallible; errors only come
//! from validation, configuration and the task stores.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusmate-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Task store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a task or agenda store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record with this id for the current user
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Remote store rejected or failed the request
    #[error("Remote store error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// Transport-level failure talking to the remote store
    #[error("Remote store unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// Runtime for the blocking remote client could not start
    #[error("Async runtime unavailable: {0}")]
    Runtime(#[source] std::io::Error),

    /// Invalid remote base URL
    #[error("Invalid remote URL: {0}")]
    Url(#[from] url::ParseError),

    /// A stored record could not be decoded
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// The backend cannot persist part of the record
    #[error("{0} are not supported by this store")]
    Unsupported(&'static str),

    /// Record or identity failed validation before reaching the store
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),
}

impl StoreError {
    pub fn task_not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind: "Task",
            id: id.into(),
        }
    }

    pub fn agenda_not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind: "Agenda item",
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Config key does not exist
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Task content is blank
    #[error("Task content must not be empty")]
    EmptyContent,

    /// Identity has no user id
    #[error("User id is required")]
    MissingUserId,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg) => {
                if code.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
