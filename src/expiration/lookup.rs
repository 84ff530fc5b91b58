use super::days;
use crate::keyset::KeyRecord;
use jiff::{SignedDuration, Timestamp};
use snafu::{ResultExt, Snafu};

/// Finds the instant a key stops being valid
pub trait ExpirationLookup {
    fn expiration(&self, key: &KeyRecord, now: Timestamp) -> Result<Timestamp, LookupError>;
}

#[derive(Debug, Snafu)]
#[snafu(display("expiration of key {key_id} is out of range"))]
pub struct LookupError {
    key_id: u32,
    source: jiff::Error,
}

impl LookupError {
    pub fn key_id(&self) -> u32 {
        self.key_id
    }
}

/// Stand-in until keys carry a signed expiration: even key ids expire in 10 days, odd ones in 40
#[derive(Debug, Clone, Copy, Default)]
pub struct ParityExpiration;

impl ExpirationLookup for ParityExpiration {
    fn expiration(&self, key: &KeyRecord, now: Timestamp) -> Result<Timestamp, LookupError> {
        let lifetime = if key.key_id % 2 == 0 { days(10) } else { days(40) };
        now.checked_add(lifetime)
            .context(LookupSnafu { key_id: key.key_id })
    }
}

/// Expiration written in the key metadata.
///
/// Keys without one are considered to expire `fallback_lifetime` after their creation.
#[derive(Debug, Clone, Copy)]
pub struct RecordedExpiration {
    fallback_lifetime: SignedDuration,
}

impl Default for RecordedExpiration {
    fn default() -> Self {
        Self::new(days(365))
    }
}

impl RecordedExpiration {
    pub fn new(fallback_lifetime: SignedDuration) -> Self {
        Self { fallback_lifetime }
    }
}

impl ExpirationLookup for RecordedExpiration {
    fn expiration(&self, key: &KeyRecord, _now: Timestamp) -> Result<Timestamp, LookupError> {
        match key.expired_at {
            Some(expired_at) => Ok(expired_at),
            None => key
                .created_at
                .checked_add(self.fallback_lifetime)
                .context(LookupSnafu { key_id: key.key_id }),
        }
    }
}
