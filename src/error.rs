//! Error types for the Onoma library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`OnomaError`] enum.
//!
//! Note that the query path itself is designed not to fail: malformed names
//! degrade to surname-only tokens and missing tables degrade to an empty
//! lookup. Errors surface from table loading, corpus scans, configuration
//! and the CLI.
//!
//! # Examples
//!
//! ```
//! use onoma::error::{OnomaError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(OnomaError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Onoma operations.
#[derive(Error, Debug)]
pub enum OnomaError {
    /// I/O errors (table files, corpus files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (normalization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Lookup table errors (building or loading a table)
    #[error("Table error: {0}")]
    Table(String),

    /// Corpus scan errors
    #[error("Scan error: {0}")]
    Scan(String),

    /// Query construction errors
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with OnomaError.
pub type Result<T> = std::result::Result<T, OnomaError>;

impl OnomaError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        OnomaError::Analysis(msg.into())
    }

    /// Create a new table error.
    pub fn table<S: Into<String>>(msg: S) -> Self {
        OnomaError::Table(msg.into())
    }

    /// Create a new scan error.
    pub fn scan<S: Into<String>>(msg: S) -> Self {
        OnomaError::Scan(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        OnomaError::Query(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        OnomaError::Table(msg.into()) // Parse errors only come from table files
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        OnomaError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        OnomaError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        OnomaError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = OnomaError::table("Test table error");
        assert_eq!(error.to_string(), "Table error: Test table error");

        let error = OnomaError::scan("Test scan error");
        assert_eq!(error.to_string(), "Scan error: Test scan error");

        let error = OnomaError::invalid_config("bad field");
        assert_eq!(error.to_string(), "Configuration error: bad field");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let onoma_error = OnomaError::from(io_error);

        match onoma_error {
            OnomaError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
