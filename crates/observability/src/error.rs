//! Error types for observability crate

use thiserror::Error;

/// Errors that can occur during logging initialization
#[derive(Error, Debug)]
pub enum ObservabilityError {
    /// A global subscriber was already installed
    #[error("Failed to initialize observability: {0}")]
    InitFailed(String),

    /// Configuration error (e.g. unparsable filter directive)
    #[error("Configuration error: {0}")]
    Config(String),
}
