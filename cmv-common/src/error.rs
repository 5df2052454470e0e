//! Common error types for CMV

use thiserror::Error;

/// Common result type for CMV operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across CMV crates
///
/// Rule evaluation itself never fails; these cover loading inputs and
/// constructing the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Album descriptor could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Rule registry rejected a rule (bad metadata or duplicate id)
    #[error("Registry error: {0}")]
    Registry(String),
}
