//! Core error types for orbit-core.
//!
//! The engine itself is total over valid input; everything here describes
//! input that was refused (bad habit fields, malformed snapshots, invalid
//! configuration) or unknown identifiers.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for orbit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Snapshot (load/import) errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// No habit with the given id exists in the store
    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors for habit input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming
    #[error("'{0}' must not be empty")]
    EmptyField(&'static str),

    /// A string did not name a known variant
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Administrative repair attempted without confirmation
    #[error("'{0}' discards scoring history and requires explicit confirmation")]
    NotConfirmed(&'static str),
}

/// Errors raised when a persisted or imported document is rejected.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Root of the document is not a JSON array
    #[error("Habit document root must be an array, found {found}")]
    NotAnArray { found: &'static str },

    /// A record could not be decoded into a habit
    #[error("Record {index} is malformed: {message}")]
    MalformedRecord { index: usize, message: String },

    /// A record decoded but violates a habit invariant
    #[error("Record {index} ('{id}') violates invariant: {message}")]
    InvariantViolation {
        index: usize,
        id: String,
        message: String,
    },

    /// Two records share an id
    #[error("Duplicate habit id '{0}'")]
    DuplicateId(String),

    /// The document is not valid JSON at all
    #[error("Document is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
