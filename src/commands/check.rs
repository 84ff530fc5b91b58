use std::path::PathBuf;

use keyexpiry::expiration::{self, format_notification, Checker, KeyInfo, RecordedExpiration};
use snafu::{OptionExt, ResultExt};
use tracing::debug;

use crate::cli::ExpirationSource;
use crate::config::Config;
use crate::profiles::{Profile, ProfileDirectory};
use crate::{CheckSnafu, CliError, EncodeSnafu, GetUserSnafu, NoProfilesSnafu};

pub(crate) struct CheckArgs {
    pub user_id: String,
    pub warning_days: Option<u32>,
    pub profiles: Option<PathBuf>,
    pub expiration_source: ExpirationSource,
    pub json: bool,
}

pub(crate) fn cmd_check_expiration(cfg: &Config, args: CheckArgs) -> Result<(), CliError> {
    let path = cfg.profiles_path(args.profiles).context(NoProfilesSnafu)?;
    let directory = ProfileDirectory::open(&path)?;

    let user = directory.get_user(&args.user_id).context(GetUserSnafu {
        user_id: args.user_id.as_str(),
    })?;

    let warning_days = cfg.warning_days(args.warning_days);
    debug!(user_id = %args.user_id, warning_days, source = ?args.expiration_source, "checking keys");

    let results = check(user, warning_days, args.expiration_source)?;

    let output = if args.json {
        serde_json::to_string_pretty(&results).context(EncodeSnafu)?
    } else {
        format_notification(&results)
    };
    println!("{output}");

    Ok(())
}

fn check(
    user: &Profile,
    warning_days: u32,
    source: ExpirationSource,
) -> Result<Vec<KeyInfo>, CliError> {
    let checker = Checker::new(Some(expiration::Config::from_days(warning_days)));
    let results = match source {
        ExpirationSource::Parity => checker.check_user(Some(user)),
        ExpirationSource::Recorded => checker
            .with_lookup(RecordedExpiration::default())
            .check_user(Some(user)),
    };
    results.context(CheckSnafu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyexpiry::expiration::KeyStatus;
    use keyexpiry::{AuthorizedKeys, Keyset, SigningKey, User};

    fn profile(expires_in_days: Option<i64>) -> Profile {
        let key = SigningKey::<String>::generate();
        let key = match expires_in_days {
            Some(days) => key
                .with_expiration(jiff::Timestamp::now().as_second() + days * 86_400)
                .unwrap(),
            None => key,
        };
        User::new("dave@example.com")
            .with_authorized_keys(AuthorizedKeys::from(Keyset::new(vec![key])))
    }

    #[test]
    fn recorded_source_reads_metadata() {
        let results = check(&profile(Some(-2)), 30, ExpirationSource::Recorded).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, KeyStatus::Expired);

        let results = check(&profile(Some(90)), 30, ExpirationSource::Recorded).unwrap();
        assert_eq!(results[0].status, KeyStatus::Valid);
    }

    #[test]
    fn parity_source_ignores_metadata() {
        let results = check(&profile(Some(-2)), 30, ExpirationSource::Parity).unwrap();
        assert_ne!(results[0].status, KeyStatus::Expired);
    }

    #[test]
    fn user_without_keys() {
        let user = Profile::new("erin@example.com");
        let results = check(&user, 30, ExpirationSource::Parity).unwrap();
        assert_eq!(format_notification(&results), "No keys found");
    }
}
