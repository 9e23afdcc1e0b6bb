//! Error typedefs for profile store access

use {reqwest::StatusCode, thiserror::Error as ThisError};

/// The error produced from most ProfileStore functions
#[derive(Debug, ThisError)]
pub enum StoreError {
    /// The request never produced a usable response (connect, timeout, decode)
    #[error("request to document store failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status
    #[error("document store responded with {status}: {message}")]
    Api { status: StatusCode, message: String },
    /// Credentials can't be sent as header values
    #[error(transparent)]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    /// The configured endpoint can't have path segments appended
    #[error("document store endpoint cannot be used as a base URL")]
    EndpointCannotBeABase,
    /// An unexpected error occurred
    #[error("{0}")]
    Other(String),
}
