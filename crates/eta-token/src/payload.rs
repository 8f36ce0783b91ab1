//! Plaintext payload sealed inside a session token.

use crate::error::TokenError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Data carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Random identifier, unique per token.
    pub id: Uuid,

    /// The authenticated subject (a user id).
    pub principal_id: Uuid,

    /// When the token was issued.
    pub issued_at: DateTime<Utc>,

    /// When the token stops being valid.
    pub expired_at: DateTime<Utc>,
}

impl Payload {
    /// Build a payload issued at `now` and valid for `duration`.
    ///
    /// Zero and negative durations are accepted and yield a payload that is
    /// already expired. If `now + duration` falls outside the representable
    /// range, the expiry saturates at the corresponding bound.
    pub fn new(principal_id: Uuid, duration: Duration, now: DateTime<Utc>) -> Self {
        let expired_at = now.checked_add_signed(duration).unwrap_or(if duration < Duration::zero() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });

        Self {
            id: Uuid::new_v4(),
            principal_id,
            issued_at: now,
            expired_at,
        }
    }

    /// Check whether the payload has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expired_at
    }

    /// Fail with [`TokenError::ExpiredToken`] if the payload has expired at `now`.
    pub fn check_valid_at(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if self.is_expired_at(now) {
            return Err(TokenError::ExpiredToken);
        }
        Ok(())
    }

    /// Validity window length.
    pub fn lifetime(&self) -> Duration {
        self.expired_at - self.issued_at
    }

    /// Time left before expiry at `now`, zero once expired.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        (self.expired_at - now).max(Duration::zero())
    }
}
