//! # eta-token
//!
//! Session token handling for the Logistics ETA API.
//!
//! This crate provides functionality for:
//! - Issuing encrypted bearer tokens that bind a principal to a validity window
//! - Verifying tokens and classifying failures (invalid vs. expired)
//! - Decoding and generating the 32-byte symmetric key
//!
//! ## Token Model
//!
//! | Piece | Role |
//! |-------|------|
//! | [`Payload`] | Plaintext sealed inside the token: token id, principal, issued/expiry times |
//! | [`Maker`] | Capability to create and verify tokens, held as `Arc<dyn Maker>` by callers |
//! | [`PasetoMaker`] | PASETO `v4.local` implementation (XChaCha20 + BLAKE2b MAC) |
//!
//! Tokens are stateless. Nothing is stored per token; expiry is the only way a
//! token stops being valid, short of replacing the key.

pub mod clock;
pub mod error;
pub mod keys;
pub mod maker;
pub mod paseto;
pub mod payload;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::TokenError;
pub use keys::{KEY_SIZE, decode_key_material, generate_key_hex};
pub use maker::Maker;
pub use paseto::PasetoMaker;
pub use payload::Payload;
