//! Error types for cda-resolver.

use thiserror::Error;

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a resolution pass.
///
/// Unresolved or malformed links are not errors; they are handled by the
/// nullify policy.
#[derive(Debug, Error)]
pub enum Error {
    /// The batch or its context cannot be resolved
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Bad configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// The worker task running a pass failed
    #[error("Resolution task failed: {0}")]
    Join(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<cda_model::Error> for Error {
    fn from(e: cda_model::Error) -> Self {
        match e {
            cda_model::Error::InvalidInput(msg) => Error::InvalidInput(msg),
            cda_model::Error::Serialization(e) => Error::Serialization(e),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::Join(e.to_string())
    }
}
