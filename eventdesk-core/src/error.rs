//! Error types for eventdesk.

use thiserror::Error;

/// Errors raised by event gateways.
///
/// Status-carrying variants hold the HTTP status text of the failed response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Error fetching events: {0}")]
    ListFailed(String),

    #[error("Malformed event list payload")]
    MalformedList,

    #[error("Error creating event: {0}")]
    CreateFailed(String),

    #[error("Event with id {0} not found")]
    NotFound(String),

    #[error("Error updating event: {0}")]
    UpdateFailed(String),

    #[error("Error deleting event: {0}")]
    DeleteFailed(String),

    /// DNS, refused connection, timeout and other failures below HTTP.
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Invalid API base URL '{0}': {1}")]
    InvalidApiBase(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
