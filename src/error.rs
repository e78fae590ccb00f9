//! Error types for debcl modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from changelog entry operations.
///
/// Every variant is recoverable: the caller reports it and leaves the
/// document untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("Name or email is not set")]
    MissingIdentity,

    #[error("No changelog line found below the cursor")]
    NoChangelogHeaderFound,

    #[error("No active document")]
    NoActiveDocument,

    #[error("Could not find the changelog item boundaries")]
    EntryBoundaryNotFound,

    #[error("Could not extract author and email information from '{0}'")]
    TrailerUnparsable(String),

    #[error("Invalid version '{version}': segment '{segment}' is not a number")]
    InvalidVersion { version: String, segment: String },

    #[error("UTC offset of {0} minutes is out of range")]
    InvalidUtcOffset(i32),

    #[error("Position {line}:{column} is outside the document")]
    PositionOutOfRange { line: usize, column: usize },
}

/// Errors from reading, editing, or writing a changelog document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Edit at {line}:{column} is outside the document")]
    InvalidPosition { line: usize, column: usize },

    #[error("Edits overlap at {line}:{column}")]
    OverlappingEdits { line: usize, column: usize },
}

/// Errors from the identity configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine a config directory; set DEBCL_CONFIG")]
    NoConfigDir,

    #[error("Failed to read config {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },

    #[error("Failed to write config {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
