//! Session token configuration.

use super::ConfigError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for session token handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Environment variable containing the symmetric key.
    #[serde(default = "default_symmetric_key_env")]
    pub symmetric_key_env: String,

    /// Path to a file containing the symmetric key.
    #[serde(default)]
    pub symmetric_key_file: Option<PathBuf>,

    /// Lifetime of newly issued access tokens (e.g., "15m", "24h").
    #[serde(default = "default_access_token_duration")]
    pub access_token_duration: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            symmetric_key_env: default_symmetric_key_env(),
            symmetric_key_file: None,
            access_token_duration: default_access_token_duration(),
        }
    }
}

impl TokenConfig {
    /// Resolve the symmetric key from environment or file.
    ///
    /// Returns the configured string form; decoding and length checks happen
    /// when the token maker is built.
    pub fn resolve_symmetric_key(&self) -> Result<Option<String>, std::io::Error> {
        // Try environment variable first
        if let Ok(key) = std::env::var(&self.symmetric_key_env) {
            if !key.trim().is_empty() {
                return Ok(Some(key));
            }
        }

        // Try file path
        if let Some(path) = &self.symmetric_key_file {
            if path.exists() {
                let key = std::fs::read_to_string(path)?;
                return Ok(Some(key.trim().to_string()));
            }
        }

        Ok(None)
    }

    /// Parsed access token lifetime.
    pub fn access_token_duration(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.access_token_duration)
    }
}

fn default_symmetric_key_env() -> String {
    "TOKEN_SYMMETRIC_KEY".to_string()
}

fn default_access_token_duration() -> String {
    "15m".to_string()
}

/// Parse a duration string like "24h", "7d", "15m", "-1m" into a `chrono::Duration`.
///
/// A bare number is read as hours.
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim().to_lowercase();
    let invalid = || ConfigError::Config(format!("invalid duration: {s:?}"));

    let (amount, unit) = match s.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&s[..idx], c),
        _ => (s.as_str(), 'h'),
    };
    let amount: i64 = amount.trim().parse().map_err(|_| invalid())?;

    let duration = match unit {
        'd' => Duration::try_days(amount),
        'h' => Duration::try_hours(amount),
        'm' => Duration::try_minutes(amount),
        's' => Duration::try_seconds(amount),
        _ => None,
    };
    duration.ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("24h").unwrap(), Duration::hours(24));
        assert_eq!(parse_duration("7d").unwrap(), Duration::days(7));
        assert_eq!(parse_duration("15m").unwrap(), Duration::minutes(15));
        assert_eq!(parse_duration("60s").unwrap(), Duration::seconds(60));
        assert_eq!(parse_duration("-1m").unwrap(), Duration::minutes(-1));
        assert_eq!(parse_duration(" 2 ").unwrap(), Duration::hours(2));
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("3w").is_err());
        assert!(parse_duration(&format!("{}d", i64::MAX)).is_err());
    }

    #[test]
    fn test_default_duration() {
        let config = TokenConfig::default();
        assert_eq!(config.access_token_duration().unwrap(), Duration::minutes(15));
    }

    #[test]
    fn test_resolve_key_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "abcdefghijklmnopqrstuvwxyzabcdef").unwrap();

        let config = TokenConfig {
            symmetric_key_env: "ETA_TEST_UNSET_TOKEN_KEY".to_string(),
            symmetric_key_file: Some(file.path().to_path_buf()),
            ..TokenConfig::default()
        };

        assert_eq!(
            config.resolve_symmetric_key().unwrap().as_deref(),
            Some("abcdefghijklmnopqrstuvwxyzabcdef")
        );
    }

    #[test]
    fn test_resolve_key_prefers_env() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "from-file").unwrap();

        let var = "ETA_TEST_TOKEN_KEY_PREFERS_ENV";
        // SAFETY: test-only. Every environment access in this test binary goes
        // through `std::env`, which serializes reads and writes on one lock, and
        // no foreign code reads the environment here.
        unsafe { std::env::set_var(var, "from-env") };

        let config = TokenConfig {
            symmetric_key_env: var.to_string(),
            symmetric_key_file: Some(file.path().to_path_buf()),
            ..TokenConfig::default()
        };
        assert_eq!(
            config.resolve_symmetric_key().unwrap().as_deref(),
            Some("from-env")
        );

        unsafe { std::env::remove_var(var) };
    }

    #[test]
    fn test_resolve_key_missing() {
        let config = TokenConfig {
            symmetric_key_env: "ETA_TEST_UNSET_TOKEN_KEY".to_string(),
            symmetric_key_file: Some(PathBuf::from("/nonexistent/eta/token.key")),
            ..TokenConfig::default()
        };
        assert!(config.resolve_symmetric_key().unwrap().is_none());
    }
}
