//! Error types for client construction and configuration.

use thiserror::Error;

/// Result type for client setup.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while configuring or building the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Endpoint URL has the wrong scheme or is empty.
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The offending URL.
        endpoint: String,
        /// What is wrong with it.
        reason: String,
    },

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Config file is not valid YAML.
    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Config file could not be read.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
}
