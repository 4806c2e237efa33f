//! CLI error type and result alias.

use thiserror::Error;

use randgen_stream::error::{GenerateError, StreamError};

/// Errors surfaced by the randgen CLI.
#[derive(Error, Debug)]
pub enum CliError {
    /// An argument was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Stream construction failed.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Production failed at runtime.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot file could not be parsed or written.
    #[error("Malformed snapshot file: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// CLI result alias.
pub type Result<T> = std::result::Result<T, CliError>;
