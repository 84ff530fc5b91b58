use std::io::Write;
use std::path::Path;

use keyexpiry::{AuthorizedKeys, KeyMetadata, Keyset, SigningKey, SigningKeys};
use snafu::ResultExt;
use tracing::info;

use crate::{CliError, EncodeSnafu, ExpirationSnafu, WriteKeysetSnafu};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

pub(crate) fn cmd_create_keyset(
    keys: u8,
    expires_in_days: Option<u32>,
    comment: Option<String>,
    output: &Path,
) -> Result<(), CliError> {
    let signing = generate(keys, expires_in_days, comment)?;
    let key_ids: Vec<u32> = signing.keys().iter().map(KeyMetadata::key_id).collect();

    let json = serde_json::to_string_pretty(&signing).context(EncodeSnafu)?;
    write_new_file(output, json.as_bytes()).context(WriteKeysetSnafu { path: output })?;
    info!(path = %output.display(), ?key_ids, "wrote signing keyset");

    let authorized = AuthorizedKeys::from(signing);
    let json = serde_json::to_string_pretty(&authorized).context(EncodeSnafu)?;
    println!("{json}");

    Ok(())
}

fn generate(
    keys: u8,
    expires_in_days: Option<u32>,
    comment: Option<String>,
) -> Result<SigningKeys<String>, CliError> {
    let expiration = expires_in_days
        .map(|days| jiff::Timestamp::now().as_second() + i64::from(days) * SECONDS_PER_DAY);

    let keys = (0..keys)
        .map(|_| {
            let key = SigningKey::generate();
            let key = match &comment {
                Some(comment) => key.with_comment(comment.clone()),
                None => key,
            };
            match expiration {
                Some(timestamp) => key.with_expiration(timestamp),
                None => Ok(key),
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .context(ExpirationSnafu)?;

    Ok(Keyset::new(keys))
}

/// Private keys never overwrite an existing file and are only readable by their owner
fn write_new_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(content)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyexpiry::KeysetHandle;

    #[test]
    fn generated_keys_share_metadata() {
        let keyset = generate(3, Some(10), Some("laptop".into())).unwrap();
        assert_eq!(keyset.len(), 3);
        assert_eq!(keyset.primary_key_id(), Some(keyset.keys()[0].key_id()));

        let info = keyset.keyset_info().unwrap();
        let now = jiff::Timestamp::now();
        for key in &info.keys {
            let expired_at = key.expired_at.unwrap();
            assert!(expired_at > now);
            assert!(expired_at.as_second() - now.as_second() <= 10 * SECONDS_PER_DAY);
        }
        assert!(keyset
            .keys()
            .iter()
            .all(|k| k.comment().map(String::as_str) == Some("laptop")));
    }

    #[test]
    fn without_expiration() {
        let keyset = generate(1, None, None).unwrap();
        assert!(keyset.keys()[0].expired_at().is_none());
        assert!(keyset.keys()[0].comment().is_none());
    }

    #[test]
    fn refuses_to_overwrite() {
        let path = std::env::temp_dir().join(format!(
            "keyexpiry-keyset-{}-{}.json",
            std::process::id(),
            jiff::Timestamp::now().as_nanosecond()
        ));

        write_new_file(&path, b"first").unwrap();
        let err = write_new_file(&path, b"second").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read(&path).unwrap(), b"first");

        std::fs::remove_file(&path).unwrap();
    }
}
