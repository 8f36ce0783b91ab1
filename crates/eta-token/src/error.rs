//! Error types for session token operations.

use thiserror::Error;

/// Errors that can occur while creating or verifying session tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The symmetric key does not have the size the cipher requires.
    #[error("invalid key size: must be exactly {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    /// The token failed structural decoding or authentication.
    #[error("token is invalid")]
    InvalidToken,

    /// The token authenticated but its validity window has elapsed.
    #[error("token has expired")]
    ExpiredToken,

    /// Failed to serialize the payload.
    #[error("token serialization error: {0}")]
    Serialization(String),

    /// Failed to encrypt the payload.
    #[error("failed to encrypt token: {0}")]
    Encryption(String),
}

impl TokenError {
    /// Stable error code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::InvalidKeySize { .. } => "INVALID_KEY_SIZE",
            TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::ExpiredToken => "TOKEN_EXPIRED",
            TokenError::Serialization(_) => "TOKEN_SERIALIZATION_ERROR",
            TokenError::Encryption(_) => "TOKEN_ENCRYPTION_ERROR",
        }
    }

    /// True for failures caused by the presented credential rather than by
    /// configuration or an internal fault.
    pub fn is_credential_error(&self) -> bool {
        matches!(self, TokenError::InvalidToken | TokenError::ExpiredToken)
    }
}
