//! Error types for the Rocchio library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`RocchioError`] enum.
//!
//! # Examples
//!
//! ```
//! use rocchio::error::{RocchioError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(RocchioError::config("target precision must be within [0, 1]"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Rocchio operations.
#[derive(Error, Debug)]
pub enum RocchioError {
    /// I/O errors (stop-word files, terminal interaction)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors (bad arguments, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Search provider errors (quota, authentication, malformed responses)
    #[error("Search error: {0}")]
    Search(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Operation not permitted in the current session state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

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

/// Result type alias for operations that may fail with RocchioError.
pub type Result<T> = std::result::Result<T, RocchioError>;

impl RocchioError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        RocchioError::Config(msg.into())
    }

    /// Create a new search provider error.
    pub fn search<S: Into<String>>(msg: S) -> Self {
        RocchioError::Search(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        RocchioError::Analysis(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        RocchioError::InvalidOperation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RocchioError::Other(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        RocchioError::Search(format!("Timeout: {}", msg.into()))
    }
}
