//! Error types for the reflective display service.

use thiserror::Error;

/// Errors that can occur when configuring the display or serving the API.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied value was rejected (negative lux, unknown profile, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Server configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for an [`Error::InvalidInput`] with a formatted message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    /// Whether this error was caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

#[cfg(feature = "server")]
impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(format!("Invalid config YAML: {}", err))
    }
}
