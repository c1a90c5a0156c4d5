//! Centralized error types for seraf.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for seraf operations.
#[derive(Error, Debug)]
pub enum SerafError {
    #[error("Parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid entity name: '{0}'")]
    InvalidEntityName(String),

    #[error("Invalid use-case name: '{0}' (expected kebab-case, e.g. approve-order)")]
    InvalidUseCaseName(String),

    #[error("Invalid filter key: '{0}' (expected a field identifier)")]
    InvalidFilterKey(String),

    #[error("Model file not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for seraf operations.
pub type SerafResult<T> = Result<T, SerafError>;

impl SerafError {
    /// Create a parse error at a zero-based tree-sitter position.
    pub fn parse_at(row: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line: row + 1,
            column: column + 1,
            message: message.into(),
        }
    }

    /// Create a template error.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }
}
