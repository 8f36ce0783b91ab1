//! Symmetric key material for session tokens.
//!
//! The key is configured as a string and accepted in three forms, tried in
//! order:
//! - 64 hex characters
//! - base64 (url-safe or standard) that decodes to exactly [`KEY_SIZE`] bytes
//! - the raw bytes of the string itself
//!
//! Decoding never checks the resulting length against [`KEY_SIZE`] for the raw
//! form; [`PasetoMaker::new`](crate::PasetoMaker::new) rejects anything that is
//! not exactly [`KEY_SIZE`] bytes.

use base64::{Engine as _, engine::general_purpose};
use rand::RngCore;

/// Key size required by PASETO `v4.local`.
pub const KEY_SIZE: usize = 32;

/// Decode a configured key string into key bytes.
pub fn decode_key_material(raw: &str) -> Vec<u8> {
    let trimmed = raw.trim();

    if trimmed.len() == KEY_SIZE * 2 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        if let Ok(bytes) = hex::decode(trimmed) {
            return bytes;
        }
    }

    for engine in [&general_purpose::URL_SAFE_NO_PAD, &general_purpose::URL_SAFE] {
        if let Ok(bytes) = engine.decode(trimmed) {
            if bytes.len() == KEY_SIZE {
                return bytes;
            }
        }
    }
    for engine in [&general_purpose::STANDARD_NO_PAD, &general_purpose::STANDARD] {
        if let Ok(bytes) = engine.decode(trimmed) {
            if bytes.len() == KEY_SIZE {
                return bytes;
            }
        }
    }

    trimmed.as_bytes().to_vec()
}

/// Generate a random key, hex encoded.
pub fn generate_key_hex() -> String {
    let mut rng = rand::rng();
    let mut bytes = [0u8; KEY_SIZE];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_key_roundtrip() {
        let key = generate_key_hex();
        assert_eq!(key.len(), KEY_SIZE * 2);
        assert_eq!(decode_key_material(&key).len(), KEY_SIZE);
        assert_ne!(generate_key_hex(), key);
    }

    #[test]
    fn test_decode_base64_forms() {
        let bytes = [7u8; KEY_SIZE];
        let url = general_purpose::URL_SAFE_NO_PAD.encode(bytes);
        let std = general_purpose::STANDARD.encode(bytes);

        assert_eq!(decode_key_material(&url), bytes.to_vec());
        assert_eq!(decode_key_material(&std), bytes.to_vec());
    }

    #[test]
    fn test_decode_raw_string() {
        let raw = "abcdefghijklmnopqrstuvwxyzabcdef";
        assert_eq!(raw.len(), KEY_SIZE);
        assert_eq!(decode_key_material(raw), raw.as_bytes().to_vec());

        // Surrounding whitespace from files or env vars is ignored.
        assert_eq!(decode_key_material(&format!("  {raw}\n")), raw.as_bytes().to_vec());
    }

    #[test]
    fn test_decode_short_key_keeps_length() {
        assert_eq!(decode_key_material("tooshort").len(), 8);
    }
}
