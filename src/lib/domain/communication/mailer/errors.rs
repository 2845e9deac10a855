//! Transport errors

use thiserror::Error;

/// Errors raised by a direct mail transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server could not be reached or refused the message
    #[error("An error occurred while sending the email: {0}")]
    SendError(String),

    /// Invalid email address
    #[error("Invalid email address")]
    InvalidEmail,

    /// A header name or value could not be encoded
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for TransportError {
    fn from(err: anyhow::Error) -> Self {
        TransportError::UnknownError(err)
    }
}
