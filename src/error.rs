//! Taker error classes and their process exit codes

use crate::config::ConfigError;
use paradigm_client::{AuthError, RestError, WsError};
use thiserror::Error;

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG: i32 = 1;
pub const EXIT_AUTH: i32 = 2;
pub const EXIT_NETWORK: i32 = 3;
pub const EXIT_PROTOCOL: i32 = 4;
pub const EXIT_INTERRUPTED: i32 = 130;

#[derive(Error, Debug)]
pub enum TakerError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Venue protocol error: {0}")]
    VenueProtocol(String),

    #[error("Interrupted")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, TakerError>;

impl TakerError {
    pub fn exit_code(&self) -> i32 {
        match self {
            TakerError::Configuration(_) => EXIT_CONFIG,
            TakerError::Authentication(_) => EXIT_AUTH,
            TakerError::Network(_) => EXIT_NETWORK,
            TakerError::VenueProtocol(_) => EXIT_PROTOCOL,
            TakerError::Interrupted => EXIT_INTERRUPTED,
        }
    }

    /// Errors that end the run even when raised by a single order
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TakerError::Configuration(_) | TakerError::Authentication(_) | TakerError::Interrupted
        )
    }

    /// Short class name used in log lines
    pub fn class(&self) -> &'static str {
        match self {
            TakerError::Configuration(_) => "ConfigurationError",
            TakerError::Authentication(_) => "AuthenticationError",
            TakerError::Network(_) => "NetworkError",
            TakerError::VenueProtocol(_) => "VenueProtocolError",
            TakerError::Interrupted => "Interrupted",
        }
    }
}

impl From<AuthError> for TakerError {
    fn from(e: AuthError) -> Self {
        TakerError::Authentication(e.to_string())
    }
}

impl From<RestError> for TakerError {
    fn from(e: RestError) -> Self {
        match e {
            RestError::RequestFailed(err) if err.is_decode() => {
                TakerError::VenueProtocol(err.to_string())
            }
            RestError::RequestFailed(err) => TakerError::Network(err.to_string()),
            RestError::Unauthorized(msg) => TakerError::Authentication(msg),
            RestError::AuthFailed(err) => err.into(),
            e @ (RestError::ApiError { .. }
            | RestError::DeserializeFailed(_)
            | RestError::SerializeFailed(_)) => TakerError::VenueProtocol(e.to_string()),
        }
    }
}

impl From<WsError> for TakerError {
    fn from(e: WsError) -> Self {
        match e {
            WsError::Unauthorized(_) => TakerError::Authentication(e.to_string()),
            WsError::Connect(_) | WsError::Timeout(_) | WsError::Closed => {
                TakerError::Network(e.to_string())
            }
            WsError::Rejected(_) | WsError::Serialize(_) => TakerError::VenueProtocol(e.to_string()),
        }
    }
}
