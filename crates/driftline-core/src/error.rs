//! Error types for Driftline Core
//!
//! This module defines all error types used throughout the core engine.
//! We use `thiserror` for ergonomic error definitions with automatic Display/Error implementations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Driftline operations
pub type Result<T> = std::result::Result<T, DriftlineError>;

/// Main error type for Driftline operations
#[derive(Error, Debug)]
pub enum DriftlineError {
    /// An edit position lies outside the current content
    #[error("Position {index} out of bounds for content of length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// An edit range is inverted or extends past the content
    #[error("Invalid range {start}..{end} for content of length {len}")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },

    /// A byte offset falls inside a multi-byte UTF-8 character
    #[error("Byte offset {index} is not a character boundary")]
    CharBoundary { index: usize },

    /// A suggestion provider or direction analyzer failed
    #[error("Plugin failure: {0}")]
    Plugin(String),

    /// Failure writing or reading a trajectory artifact
    #[error("Persistence error for {path:?}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        source: Box<DriftlineError>,
    },
}

impl DriftlineError {
    /// Add context to an error
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add lazy context to a Result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err = DriftlineError::OutOfBounds { index: 12, len: 5 };
        let err = err.context("Failed to apply insert");

        assert!(err.to_string().contains("Failed to apply insert"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(DriftlineError::InvalidRange {
            start: 4,
            end: 2,
            len: 10,
        });
        let result = result.context("Delete rejected");

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Delete rejected"));
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = DriftlineError::OutOfBounds { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "Position 7 out of bounds for content of length 3"
        );
    }
}
