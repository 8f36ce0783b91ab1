// Configuration types shared across all ETA crates
pub mod config;

pub use config::{ConfigError, EtaConfig, ServerConfig, TokenConfig, parse_duration};
