//! Error handling for bitsummary
//!
//! Aggregation and rendering never fail. Errors only come from the edges:
//! reading record files, tree files and formatting configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bitsummary operations
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Main error type for bitsummary operations
#[derive(Error, Debug)]
pub enum SummaryError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Input Errors
    #[error("Invalid layer records in {path}: {source}")]
    InvalidRecords {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid module tree in {path}: {source}")]
    InvalidTree {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid formatting options in {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown column: {name}")]
    UnknownColumn { name: String },

    #[error("Unknown row setting: {name}")]
    UnknownRowSetting { name: String },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SummaryError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SummaryError::FileNotFound { .. } => "FILE_NOT_FOUND",
            SummaryError::FileReadError { .. } => "FILE_READ_ERROR",
            SummaryError::InvalidRecords { .. } => "INVALID_RECORDS",
            SummaryError::InvalidTree { .. } => "INVALID_TREE",
            SummaryError::InvalidConfig { .. } => "INVALID_CONFIG",
            SummaryError::UnknownColumn { .. } => "UNKNOWN_COLUMN",
            SummaryError::UnknownRowSetting { .. } => "UNKNOWN_ROW_SETTING",
            SummaryError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Wrap an I/O failure on `path`, mapping `NotFound` to `FileNotFound`
    pub(crate) fn from_read(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            SummaryError::FileNotFound {
                path: path.to_path_buf(),
                source: Some(source),
            }
        } else {
            SummaryError::FileReadError {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
