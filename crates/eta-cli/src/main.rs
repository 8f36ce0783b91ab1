use anyhow::Context;
use clap::{Parser, Subcommand};
use eta_core::EtaConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "eta", version, about = "Logistics ETA session token CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Symmetric key management
    Keys {
        #[command(subcommand)]
        cmd: KeysCommand,
    },

    /// Issue and verify session tokens
    Token {
        #[command(subcommand)]
        cmd: TokenCommand,
    },
}

#[derive(Subcommand, Debug)]
enum KeysCommand {
    /// Generate a new 32-byte symmetric key (hex encoded)
    Generate {
        /// Write the key to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Issue a token for a principal
    Create {
        /// Principal (user) id the token is bound to
        #[arg(long)]
        principal: Uuid,

        /// Token lifetime, e.g. "15m", "24h", "-1m". Defaults to token.access_token_duration.
        #[arg(long, allow_hyphen_values = true)]
        duration: Option<String>,

        /// Symmetric key (hex, base64, raw) or a path to a key file
        #[arg(long, env = "TOKEN_SYMMETRIC_KEY", hide_env_values = true)]
        key: Option<String>,
    },

    /// Verify a token and print its payload
    Verify {
        /// Token string, or a path to a file containing it
        token: String,

        /// Symmetric key (hex, base64, raw) or a path to a key file
        #[arg(long, env = "TOKEN_SYMMETRIC_KEY", hide_env_values = true)]
        key: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse(), || EtaConfig::load().context("cannot load config"))
}

/// Dispatch a parsed command. Configuration is only loaded by commands that read it.
fn run(cli: Cli, load_config: impl FnOnce() -> anyhow::Result<EtaConfig>) -> anyhow::Result<()> {
    match cli.cmd {
        Command::Keys { cmd } => match cmd {
            KeysCommand::Generate { output } => commands::keys::generate(output)?,
        },
        Command::Token { cmd } => {
            let config = load_config()?;
            match cmd {
                TokenCommand::Create {
                    principal,
                    duration,
                    key,
                } => {
                    let token =
                        commands::token::create(&config, key, principal, duration.as_deref())?;
                    println!("{}", token);
                }
                TokenCommand::Verify { token, key } => {
                    commands::token::verify(&config, key, &token)?;
                }
            }
        }
    }

    Ok(())
}
