#![deny(unsafe_code)]

mod cli;
mod commands;
mod config;
mod profiles;

use std::path::PathBuf;

use clap::Parser;
use keyexpiry::error::{CheckError, TimestampError};
use snafu::Snafu;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::*;
use crate::commands::check::CheckArgs;
use crate::config::{Config, LogLevel};

#[derive(Debug, Snafu)]
pub(crate) enum CliError {
    #[snafu(display("reading config file {}", path.display()))]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("invalid config file {}", path.display()))]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[snafu(display("no profiles file, pass --profiles or set `profiles` in the config file"))]
    NoProfiles,
    #[snafu(display("error connecting: cannot read profiles at {}", path.display()))]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("error connecting: malformed profiles at {}", path.display()))]
    Profiles {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[snafu(display("GetUser failed: no profile for {user_id}"))]
    GetUser { user_id: String },
    #[snafu(display("key expiration check failed"))]
    Check { source: CheckError },
    #[snafu(display("invalid key expiration"))]
    Expiration { source: TimestampError },
    #[snafu(display("writing keyset to {}", path.display()))]
    WriteKeyset {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("encoding json"))]
    Encode { source: serde_json::Error },
}

fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    // stdout is reserved for the notification
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

#[snafu::report]
fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let cfg = Config::load(cli.config.as_deref())?;
    init_logging(cfg.log_level);

    match cli.command {
        Commands::CheckExpiration {
            user_id,
            warning_days,
            profiles,
            expiration_source,
            json,
        } => commands::check::cmd_check_expiration(
            &cfg,
            CheckArgs {
                user_id,
                warning_days,
                profiles,
                expiration_source,
                json,
            },
        ),
        Commands::AuthorizedKeys { command } => match command {
            AuthorizedKeysCommands::CreateKeyset {
                keys,
                expires_in_days,
                comment,
                output,
            } => {
                debug!(keys, ?expires_in_days, "creating keyset");
                commands::keyset::cmd_create_keyset(keys, expires_in_days, comment, &output)
            }
        },
    }
}
