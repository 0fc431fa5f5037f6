//! Error types for the divelog application.
//!
//! This module defines the error type shared by the stores, the input
//! boundary and the command-line front end.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the divelog application.
#[derive(Error, Debug)]
pub enum LogbookError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A raw form value could not be parsed or violates a field constraint.
    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// Dive was not found when performing an operation.
    #[error("Dive not found: {id}")]
    DiveNotFound { id: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// file not found
    #[error("File not found: {file_path}")]
    FileNotFound { file_path: String },

    #[error("{message}")]
    EditorError { message: String },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}

impl LogbookError {
    pub(crate) fn invalid(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LogbookError::InvalidInput {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}
