//! Foldscan CLI library
//!
//! This library provides the command-line interface for converting,
//! validating and reporting window-size cross-validation scan results.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
