//! Error types for stackscope operations.
//!
//! The analytics engine itself never fails on well-typed input. The variants
//! here cover the supporting code around it: reading input files, decoding
//! post and history JSON, and rendering reports.
//!
//! # Example
//!
//! ```rust
//! use stackscope_core::{Result, StackscopeError};
//!
//! fn require_text(raw: &str) -> Result<&str> {
//!     if raw.trim().is_empty() {
//!         return Err(StackscopeError::InvalidInput("empty input".to_string()));
//!     }
//!     Ok(raw)
//! }
//! # assert!(require_text(" ").is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for stackscope.
#[derive(Error, Debug)]
pub enum StackscopeError {
    /// File not found.
    ///
    /// Returned when attempting to read a file that doesn't exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Standard I/O errors while reading input or writing reports.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input that was expected to be JSON could not be decoded.
    ///
    /// Covers both post payloads and history arrays.
    #[error("Invalid JSON input: {0}")]
    InvalidJson(String),

    /// Input that is structurally unusable (empty, wrong shape).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A timestamp that is not valid RFC 3339.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Report serialization failed.
    #[error("Failed to serialize output: {0}")]
    Serialize(String),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for StackscopeError {
    fn from(err: serde_json::Error) -> Self {
        StackscopeError::InvalidJson(err.to_string())
    }
}

impl From<url::ParseError> for StackscopeError {
    fn from(err: url::ParseError) -> Self {
        StackscopeError::InvalidUrl(err.to_string())
    }
}

/// Result type alias for StackscopeError.
pub type Result<T> = std::result::Result<T, StackscopeError>;
