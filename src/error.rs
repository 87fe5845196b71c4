use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Error type covering the different failure cases that can occur when the
/// tool loads, merges, or writes localization documents.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the YAML parser rejects the input outright.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Raised when a document parses as YAML but does not follow the
    /// localization layout (missing field, wrong node kind).
    #[error("invalid localization document: {0}")]
    InvalidDocument(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the scanned directory holds fewer than two documents.
    #[error("couldn't find enough localization files in {0}")]
    NotEnoughDocuments(PathBuf),

    /// Errors bubbled up from the interactive selection prompt.
    #[error("prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
