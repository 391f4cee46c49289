//! Error types for edgecase-gen

use thiserror::Error;

/// Result type alias for edgecase-gen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading generator inputs
///
/// Generation itself never fails; only decoding problems, options and
/// engine configuration from external documents does.
#[derive(Debug, Error)]
pub enum Error {
    /// Problem document could not be interpreted
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// Engine configuration is out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
