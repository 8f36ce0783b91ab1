//! PASETO `v4.local` token maker.
//!
//! Tokens are `v4.local.<base64url>` strings: the JSON-encoded [`Payload`]
//! encrypted with XChaCha20 and authenticated with a keyed BLAKE2b MAC over the
//! header, nonce and ciphertext. The header pins the version and purpose, so a
//! token from another scheme is rejected before any cryptography runs.

use crate::clock::{Clock, SystemClock};
use crate::error::TokenError;
use crate::keys::KEY_SIZE;
use crate::maker::Maker;
use crate::payload::Payload;
use chrono::Duration;
use rand::RngCore;
use rusty_paseto::prelude::*;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

const HEADER: &str = "v4.local.";

// 32-byte nonce plus 32-byte MAC, base64url without padding.
const MIN_BODY_LEN: usize = 86;

/// Token maker backed by PASETO `v4.local`.
///
/// The symmetric key is owned by the maker, never exposed, and zeroed when the
/// maker is dropped.
pub struct PasetoMaker<C = SystemClock> {
    key: PasetoSymmetricKey<V4, Local>,
    clock: C,
}

impl PasetoMaker<SystemClock> {
    /// Create a maker from a 32-byte secret, using the system clock.
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        Self::with_clock(secret, SystemClock)
    }
}

impl<C: Clock> PasetoMaker<C> {
    /// Create a maker from a 32-byte secret and an explicit clock.
    pub fn with_clock(secret: &[u8], clock: C) -> Result<Self, TokenError> {
        let bytes: [u8; KEY_SIZE] =
            secret
                .try_into()
                .map_err(|_| TokenError::InvalidKeySize {
                    expected: KEY_SIZE,
                    actual: secret.len(),
                })?;

        Ok(Self {
            key: PasetoSymmetricKey::<V4, Local>::from(Key::from(bytes)),
            clock,
        })
    }

    /// The clock this maker reads for issuance and expiry checks.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> Maker for PasetoMaker<C> {
    fn create_token(&self, principal_id: Uuid, duration: Duration) -> Result<String, TokenError> {
        let payload = Payload::new(principal_id, duration, self.clock.now());
        let json = serde_json::to_string(&payload)
            .map_err(|e| TokenError::Serialization(e.to_string()))?;

        let mut nonce_bytes = [0u8; KEY_SIZE];
        rand::rng().fill_bytes(&mut nonce_bytes);
        let nonce_key = Key::<KEY_SIZE>::from(nonce_bytes);
        let nonce = PasetoNonce::<V4, Local>::from(&nonce_key);

        let token = Paseto::<V4, Local>::default()
            .set_payload(json.as_str().into())
            .try_encrypt(&self.key, &nonce)
            .map_err(|e| TokenError::Encryption(e.to_string()))?;

        debug!(
            token_id = %payload.id,
            principal_id = %payload.principal_id,
            expired_at = %payload.expired_at,
            "issued session token"
        );

        Ok(token)
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        check_structure(token)?;

        // Decryption authenticates the header, nonce and ciphertext before any
        // plaintext is released.
        let plaintext = Paseto::<V4, Local>::try_decrypt(token, &self.key, None, None)
            .map_err(|e| {
                debug!(reason = %e, "rejected session token");
                TokenError::InvalidToken
            })?;

        let payload: Payload = serde_json::from_str(&plaintext).map_err(|e| {
            debug!(reason = %e, "authenticated token carries an unreadable payload");
            TokenError::InvalidToken
        })?;

        if let Err(err) = payload.check_valid_at(self.clock.now()) {
            debug!(
                token_id = %payload.id,
                principal_id = %payload.principal_id,
                expired_at = %payload.expired_at,
                "rejected expired session token"
            );
            return Err(err);
        }

        Ok(payload)
    }
}

/// Reject strings that cannot be a `v4.local` token without touching the key.
fn check_structure(token: &str) -> Result<(), TokenError> {
    let Some(rest) = token.strip_prefix(HEADER) else {
        debug!("rejected session token: unexpected header");
        return Err(TokenError::InvalidToken);
    };

    let body = rest.split('.').next().unwrap_or_default();
    let well_formed = body.len() >= MIN_BODY_LEN
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if !well_formed {
        debug!(body_len = body.len(), "rejected session token: malformed body");
        return Err(TokenError::InvalidToken);
    }

    Ok(())
}

impl<C> fmt::Debug for PasetoMaker<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasetoMaker")
            .field("scheme", &"v4.local")
            .field("key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::keys::generate_key_hex;
    use chrono::Utc;

    fn random_secret() -> Vec<u8> {
        hex::decode(generate_key_hex()).unwrap()
    }

    #[test]
    fn test_create_and_verify_token() {
        let maker = PasetoMaker::new(&random_secret()).unwrap();
        let principal = Uuid::new_v4();
        let duration = Duration::minutes(1);
        let issued_at = Utc::now();
        let expired_at = issued_at + duration;

        let token = maker.create_token(principal, duration).unwrap();
        assert!(!token.is_empty());
        assert!(token.starts_with("v4.local."));

        let payload = maker.verify_token(&token).unwrap();
        assert!(!payload.id.is_nil());
        assert_eq!(payload.principal_id, principal);
        assert!((payload.issued_at - issued_at).abs() <= Duration::seconds(1));
        assert!((payload.expired_at - expired_at).abs() <= Duration::seconds(1));
        assert_eq!(payload.lifetime(), duration);
    }

    #[test]
    fn test_expired_token() {
        let maker = PasetoMaker::new(&random_secret()).unwrap();
        let token = maker
            .create_token(Uuid::new_v4(), -Duration::minutes(1))
            .unwrap();
        assert!(!token.is_empty());

        let err = maker.verify_token(&token).unwrap_err();
        assert!(matches!(err, TokenError::ExpiredToken));
        assert_eq!(err.to_string(), "token has expired");
    }

    #[test]
    fn test_secret_key_length() {
        let err = PasetoMaker::new(b"abcdefghij").unwrap_err();
        assert!(matches!(
            err,
            TokenError::InvalidKeySize {
                expected: 32,
                actual: 10
            }
        ));

        assert!(PasetoMaker::new(&[0u8; 33]).is_err());
        assert!(PasetoMaker::new(&[]).is_err());
        assert!(PasetoMaker::new(&[0u8; 32]).is_ok());
    }

    #[test]
    fn test_invalid_token() {
        let maker = PasetoMaker::new(&random_secret()).unwrap();
        maker
            .create_token(Uuid::new_v4(), Duration::minutes(1))
            .unwrap();

        let err = maker.verify_token("invalidToken").unwrap_err();
        assert!(matches!(err, TokenError::InvalidToken));
        assert_eq!(err.to_string(), "token is invalid");
    }

    #[test]
    fn test_expires_after_clock_advances() {
        let clock = ManualClock::from_system_time();
        let maker = PasetoMaker::with_clock(&random_secret(), clock.clone()).unwrap();
        let principal = Uuid::new_v4();

        let token = maker.create_token(principal, Duration::minutes(1)).unwrap();
        let payload = maker.verify_token(&token).unwrap();
        assert_eq!(payload.principal_id, principal);
        assert_eq!(payload.issued_at, clock.now());
        assert_eq!(payload.expired_at - payload.issued_at, Duration::minutes(1));

        clock.advance(Duration::seconds(60));
        assert!(maker.verify_token(&token).is_ok());

        clock.advance(Duration::seconds(1) + Duration::milliseconds(1));
        assert!(matches!(
            maker.verify_token(&token),
            Err(TokenError::ExpiredToken)
        ));
    }

    #[test]
    fn test_structure_check() {
        let body = "A".repeat(MIN_BODY_LEN);
        assert!(check_structure(&format!("{HEADER}{body}")).is_ok());
        assert!(check_structure(&format!("v4.public.{body}")).is_err());
        assert!(check_structure(&format!("{HEADER}{}", &body[1..])).is_err());
        assert!(check_structure(&format!("{HEADER}{}+/", &body)).is_err());
        assert!(check_structure("invalidToken").is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let secret = [b'k'; 32];
        let maker = PasetoMaker::new(&secret).unwrap();
        let rendered = format!("{maker:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("kkkk"));
    }
}
