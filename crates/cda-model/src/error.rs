//! Error types for the content model.

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning delivery documents into model types.
#[derive(Debug, Error)]
pub enum Error {
    /// The document is not a shape this crate recognizes.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
