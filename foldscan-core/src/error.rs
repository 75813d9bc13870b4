//! Fatal error types for the core pipeline
//!
//! Only structurally unusable input is an error here. Skipped lines and
//! failed consistency checks are data, carried as [`crate::ParseDiagnostic`]
//! and validation failures respectively.

use thiserror::Error;

/// Errors that abort the pipeline before any output is produced
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input was empty or contained only whitespace
    #[error("input is empty")]
    EmptyInput,

    /// No "Window N" header was found anywhere in the input
    #[error("no window header found in input")]
    NoWindowHeader,

    /// Input could not be read
    #[error("I/O error: {0}")]
    Io(String),

    /// Input was not valid UTF-8
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Io(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for CoreError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        CoreError::Encoding(err.to_string())
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
