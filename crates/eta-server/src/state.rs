use anyhow::Context;
use eta_core::EtaConfig;
use eta_token::{Maker, PasetoMaker, decode_key_material};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub token_maker: Arc<dyn Maker>,
}

impl AppState {
    /// Build the state from configuration.
    ///
    /// A missing key or a key that does not decode to 32 bytes is a startup
    /// error; the server never serves traffic without a valid maker.
    pub fn init(cfg: &EtaConfig) -> anyhow::Result<Self> {
        let raw_key = cfg.token.resolve_symmetric_key()?.with_context(|| {
            format!(
                "token symmetric key not configured: set {} or token.symmetric_key_file",
                cfg.token.symmetric_key_env
            )
        })?;

        let maker = PasetoMaker::new(&decode_key_material(&raw_key))?;
        tracing::info!(maker = ?maker, "token maker ready");

        Ok(Self::with_maker(Arc::new(maker)))
    }

    pub fn with_maker(token_maker: Arc<dyn Maker>) -> Self {
        Self { token_maker }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eta_core::TokenConfig;
    use std::path::Path;
    use tempfile::NamedTempFile;

    fn config_with_key_file(path: &Path) -> EtaConfig {
        EtaConfig {
            token: TokenConfig {
                symmetric_key_env: "ETA_SERVER_TEST_UNSET_KEY".to_string(),
                symmetric_key_file: Some(path.to_path_buf()),
                ..TokenConfig::default()
            },
            ..EtaConfig::default()
        }
    }

    fn key_file(contents: &str) -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), contents).unwrap();
        file
    }

    #[test]
    fn test_init_requires_key() {
        let cfg = config_with_key_file(Path::new("/nonexistent/eta/token.key"));
        let err = AppState::init(&cfg).err().unwrap();
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn test_init_rejects_short_key() {
        let file = key_file("tooshort\n");

        let err = AppState::init(&config_with_key_file(file.path())).err().unwrap();
        assert!(err.to_string().contains("invalid key size"));
    }

    #[test]
    fn test_init_with_hex_key() {
        let file = key_file(&eta_token::generate_key_hex());

        assert!(AppState::init(&config_with_key_file(file.path())).is_ok());
    }
}
