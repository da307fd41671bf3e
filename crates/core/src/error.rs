//! Error types for the Chonker CLI.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, input, I/O, and serialization.

use thiserror::Error;

/// Unified error type for Chonker.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// Oversized units and empty documents are not errors; they surface as
/// warnings and statistics instead.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or conflicting configuration, raised before any splitting
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input document could not be located or decoded
    #[error("Input error: {0}")]
    Input(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
