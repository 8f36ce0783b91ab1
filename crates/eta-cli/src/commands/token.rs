//! Token commands.
//!
//! `eta token create` - Issue a token for a principal.
//! `eta token verify` - Verify a token and print its payload.

use anyhow::Context;
use chrono::Utc;
use eta_core::{EtaConfig, parse_duration};
use eta_token::{Maker, PasetoMaker, Payload, decode_key_material};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Resolve the symmetric key and build a maker.
///
/// The key string can be:
/// - A path to a file containing the key
/// - The key itself (hex, base64 or raw), e.g. from the TOKEN_SYMMETRIC_KEY env var
///
/// Without `--key`, the key configured in the `token` section is used.
fn resolve_maker(config: &EtaConfig, key: Option<String>) -> anyhow::Result<PasetoMaker> {
    let key_str = match key {
        Some(key) => key,
        None => config.token.resolve_symmetric_key()?.context(
            "Symmetric key not provided. Pass --key, set TOKEN_SYMMETRIC_KEY, or configure token.symmetric_key_file",
        )?,
    };

    // If it looks like a file path and the file exists, load from file
    let path = Path::new(key_str.trim());
    let raw = if path.exists() {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read key file: {}", path.display()))?
    } else {
        key_str
    };

    PasetoMaker::new(&decode_key_material(&raw)).context("cannot create token maker")
}

/// Issue a token for `principal`.
pub fn create(
    config: &EtaConfig,
    key: Option<String>,
    principal: Uuid,
    duration: Option<&str>,
) -> anyhow::Result<String> {
    let maker = resolve_maker(config, key)?;
    let duration = match duration {
        Some(d) => parse_duration(d)?,
        None => config.token.access_token_duration()?,
    };

    tracing::debug!(%principal, ?duration, "creating token");
    Ok(maker.create_token(principal, duration)?)
}

/// Verify a token and print its payload.
pub fn verify(config: &EtaConfig, key: Option<String>, token: &str) -> anyhow::Result<Payload> {
    let maker = resolve_maker(config, key)?;

    // Load token from file if it looks like a path
    let token_str = if Path::new(token).exists() {
        fs::read_to_string(token)?.trim().to_string()
    } else {
        token.trim().to_string()
    };

    let payload = maker
        .verify_token(&token_str)
        .map_err(|e| anyhow::anyhow!("✖ Token verification failed: {} ({})", e, e.code()))?;

    println!("✔ Token is valid");
    println!();
    println!("Token Details:");
    println!("  Token ID:   {}", payload.id);
    println!("  Principal:  {}", payload.principal_id);
    println!("  Issued at:  {}", payload.issued_at);
    println!("  Expires at: {}", payload.expired_at);
    println!("  Remaining:  {}s", payload.remaining_at(Utc::now()).num_seconds());

    Ok(payload)
}
