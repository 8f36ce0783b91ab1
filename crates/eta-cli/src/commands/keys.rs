//! Key management commands.
//!
//! `eta keys generate` - Generate a new symmetric token key.

use eta_token::generate_key_hex;
use std::fs;
use std::path::PathBuf;

/// Generate a new symmetric key.
pub fn generate(output: Option<PathBuf>) -> anyhow::Result<()> {
    let key = generate_key_hex();

    if let Some(path) = output {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&path, &key)?;

        println!("✔ Generated token key: {}", path.display());
        println!();
        println!("⚠️  Keep this key secret! Anyone holding it can mint valid tokens.");
        println!();
        println!("Set as environment variable:");
        println!("  export TOKEN_SYMMETRIC_KEY=$(cat {})", path.display());
    } else {
        println!("{}", key);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generate_key_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secrets").join("token.key");
        generate(Some(path.clone())).unwrap();

        let key = fs::read_to_string(&path).unwrap();
        // Hex keys should be 64 characters (32 bytes)
        assert_eq!(key.len(), 64);
        assert_eq!(eta_token::decode_key_material(&key).len(), 32);
    }
}
