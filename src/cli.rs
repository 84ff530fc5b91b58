use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "keyexpiry")]
#[command(about = "Warn about authorized keys that expired or will expire soon")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file, defaults to `keyexpiry/config.toml` in the user config directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Check if any of the authorized keys for a user are expired or will expire soon
    CheckExpiration {
        user_id: String,
        /// Number of days before expiration to show warnings [default: 30]
        #[arg(long)]
        warning_days: Option<u32>,
        /// JSON file holding user profiles
        #[arg(long)]
        profiles: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ExpirationSource::Parity)]
        expiration_source: ExpirationSource,
        /// Print key statuses as JSON instead of a notification
        #[arg(long)]
        json: bool,
    },
    AuthorizedKeys {
        #[command(subcommand)]
        command: AuthorizedKeysCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum AuthorizedKeysCommands {
    /// Generate a new signing keyset and print its authorized keys
    CreateKeyset {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..))]
        keys: u8,
        #[arg(long)]
        expires_in_days: Option<u32>,
        #[arg(long)]
        comment: Option<String>,
        /// Where the private keyset is written, must not exist yet
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExpirationSource {
    /// Placeholder derived from the key id
    Parity,
    /// Expiration stored in the key metadata
    Recorded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn check_expiration_defaults() {
        let cli = Cli::try_parse_from(["keyexpiry", "check-expiration", "alice@example.com"]).unwrap();
        match cli.command {
            Commands::CheckExpiration {
                user_id,
                warning_days,
                expiration_source,
                json,
                ..
            } => {
                assert_eq!(user_id, "alice@example.com");
                assert_eq!(warning_days, None);
                assert_eq!(expiration_source, ExpirationSource::Parity);
                assert!(!json);
            }
            _ => panic!("expected check-expiration"),
        }
    }

    #[test]
    fn warning_days_must_be_positive_number() {
        let parsed = Cli::try_parse_from([
            "keyexpiry",
            "check-expiration",
            "alice@example.com",
            "--warning-days",
            "-3",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn create_keyset_needs_output_and_keys() {
        assert!(Cli::try_parse_from(["keyexpiry", "authorized-keys", "create-keyset"]).is_err());
        assert!(Cli::try_parse_from([
            "keyexpiry",
            "authorized-keys",
            "create-keyset",
            "--keys",
            "0",
            "-o",
            "keys.json"
        ])
        .is_err());

        let cli = Cli::try_parse_from([
            "keyexpiry",
            "authorized-keys",
            "create-keyset",
            "-o",
            "keys.json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::AuthorizedKeys {
                command: AuthorizedKeysCommands::CreateKeyset { keys: 1, .. }
            }
        ));
    }
}
