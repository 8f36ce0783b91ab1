//! The token maker capability.

use crate::error::TokenError;
use crate::payload::Payload;
use chrono::Duration;
use uuid::Uuid;

/// Creates and verifies session tokens.
///
/// Callers hold a `Arc<dyn Maker>` so the token scheme can be replaced without
/// touching them. Implementations are immutable after construction and safe to
/// share across threads.
pub trait Maker: Send + Sync {
    /// Issue a token for `principal_id` that is valid for `duration`.
    ///
    /// `duration` may be zero or negative, in which case the token is born
    /// expired.
    fn create_token(&self, principal_id: Uuid, duration: Duration) -> Result<String, TokenError>;

    /// Authenticate `token` and return its payload.
    ///
    /// Returns [`TokenError::InvalidToken`] for anything that does not decode
    /// and authenticate under this maker's key, and [`TokenError::ExpiredToken`]
    /// for an authentic token past its expiry.
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}
