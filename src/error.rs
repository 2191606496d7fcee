//! Custom error types for tdg.
//!
//! [`TdgError`] covers the failures a caller can see: an unreadable scan root,
//! a bad filter pattern or a broken configuration. Everything that goes wrong
//! inside a single file scan is reported as a
//! [`Diagnostic`](crate::diagnostics::Diagnostic) instead and never aborts the
//! run. [`ParseError`] is the expected, non-fatal outcome of the metadata and
//! estimate parsers.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tdg operations
#[derive(Error, Debug)]
pub enum TdgError {
    // =========================================================================
    // Traversal Errors
    // =========================================================================
    /// The scan root could not be walked at all
    #[error("Cannot traverse {path}: {message}")]
    Traversal { path: PathBuf, message: String },

    // =========================================================================
    // Filter Errors
    // =========================================================================
    /// An include filter is not a valid regular expression
    #[error("Invalid include filter '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An exclude glob could not be compiled
    #[error("Invalid exclude glob '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig { field: String, reason: String },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TdgError {
    /// Create a traversal error
    pub fn traversal(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Traversal {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Traversal { .. } => 2,
            Self::InvalidFilter { .. }
            | Self::InvalidGlob { .. }
            | Self::Config { .. }
            | Self::InvalidConfig { .. } => 3,
            _ => 1,
        }
    }
}

/// Type alias for tdg results
pub type Result<T> = std::result::Result<T, TdgError>;

/// Non-fatal outcomes of the line-level parsers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is not a `key=value` metadata line, or set no known field
    #[error("Cannot parse metadata properties")]
    NotMetadata,

    /// A time estimate could not be understood
    #[error("Cannot parse time estimate '{input}'")]
    BadEstimate { input: String },
}

impl ParseError {
    pub(crate) fn bad_estimate(input: impl Into<String>) -> Self {
        Self::BadEstimate {
            input: input.into(),
        }
    }
}
