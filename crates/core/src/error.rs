//! Error types for Puffin configuration resolution.

use thiserror::Error;

/// Errors raised while resolving the process configuration.
///
/// Only malformed typed overrides are fatal. Missing version-control
/// metadata and an insecure secret key never surface here.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment override could not be coerced to its setting's type
    #[error("Invalid environment override: {0}")]
    Environment(String),
}

/// Result type alias using ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<envy::Error> for ConfigError {
    fn from(err: envy::Error) -> Self {
        ConfigError::Environment(err.to_string())
    }
}
