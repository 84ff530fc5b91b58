//! Classify the authorized keys of a user by how close they are to expiring.
//!
//! A [`Checker`] resolves the keys of a [`User`], asks its [`ExpirationLookup`] when each
//! key expires and compares that instant against the current time and a warning threshold.
//! The resulting [`KeyInfo`] list can be rendered with [`format_notification`].

mod lookup;
mod notification;

pub use lookup::{ExpirationLookup, LookupError, ParityExpiration, RecordedExpiration};
pub use notification::{format_notification, needs_rotation};

use crate::keyset::{KeysetError, KeysetHandle};
use crate::User;
use jiff::{SignedDuration, Timestamp};
use snafu::{ensure, ResultExt, Snafu};

/// Number of days before expiration at which keys get flagged by default
pub const DEFAULT_WARNING_DAYS: u32 = 30;

/// Length of a day, as used for thresholds and day counts
pub(crate) fn days(count: i64) -> SignedDuration {
    SignedDuration::from_hours(count * 24)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    warning_threshold: SignedDuration,
}

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum ConfigError {
    #[snafu(display("warning threshold {threshold} is negative"))]
    NegativeThreshold { threshold: SignedDuration },
}

impl Default for Config {
    fn default() -> Self {
        Self::from_days(DEFAULT_WARNING_DAYS)
    }
}

impl Config {
    /// Keys expiring sooner than `warning_threshold` are flagged. Zero only flags expired keys.
    pub fn new(warning_threshold: SignedDuration) -> Result<Self, ConfigError> {
        ensure!(
            !warning_threshold.is_negative(),
            NegativeThresholdSnafu {
                threshold: warning_threshold
            }
        );
        Ok(Self { warning_threshold })
    }

    pub fn from_days(warning_days: u32) -> Self {
        Self {
            warning_threshold: days(i64::from(warning_days)),
        }
    }

    pub fn warning_threshold(&self) -> SignedDuration {
        self.warning_threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    /// Expires later than the warning threshold
    Valid,
    /// Still usable, but expires within the warning threshold
    Warning,
    /// Expiration is now or in the past
    Expired,
}

impl KeyStatus {
    pub fn classify(expire_time: Timestamp, now: Timestamp, threshold: SignedDuration) -> Self {
        if expire_time <= now {
            Self::Expired
        } else if expire_time.duration_since(now) < threshold {
            Self::Warning
        } else {
            Self::Valid
        }
    }
}

impl std::fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Valid => "valid",
            Self::Warning => "warning",
            Self::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// Expiration status of one key at the time of a check
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct KeyInfo {
    pub key_id: u32,
    pub status: KeyStatus,
    #[serde(with = "crate::timestamp::required")]
    pub expire_time: Timestamp,
    /// Whole days until `expire_time`, truncated toward zero, negative once expired
    pub days_left: i64,
}

impl KeyInfo {
    fn evaluate(key_id: u32, expire_time: Timestamp, now: Timestamp, config: &Config) -> Self {
        Self {
            key_id,
            status: KeyStatus::classify(expire_time, now, config.warning_threshold),
            expire_time,
            days_left: expire_time.duration_since(now).as_hours() / 24,
        }
    }
}

#[derive(Debug, Snafu)]
pub enum CheckError {
    #[snafu(display("user cannot be absent"))]
    InvalidArgument,
    #[snafu(display("error reading key info"))]
    Resolution { source: KeysetError },
    #[snafu(display("error looking up key expiration"))]
    Lookup { source: LookupError },
}

#[derive(Debug, Clone)]
pub struct Checker<L = ParityExpiration> {
    config: Config,
    lookup: L,
}

impl Checker {
    /// Without a config, keys get flagged [`DEFAULT_WARNING_DAYS`] days before they expire
    pub fn new(config: Option<Config>) -> Self {
        Self {
            config: config.unwrap_or_default(),
            lookup: ParityExpiration,
        }
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<L> Checker<L> {
    /// Replace how expiration instants of keys are found
    pub fn with_lookup<M: ExpirationLookup>(self, lookup: M) -> Checker<M> {
        Checker {
            config: self.config,
            lookup,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<L: ExpirationLookup> Checker<L> {
    /// Status of every authorized key of `user`, in keyset order.
    ///
    /// A user without authorized keys has nothing to report and is not an error.
    pub fn check_user<H: KeysetHandle>(
        &self,
        user: Option<&User<H>>,
    ) -> Result<Vec<KeyInfo>, CheckError> {
        self.check_user_at(user, Timestamp::now())
    }

    /// Same as [`Checker::check_user`], with every key evaluated against `now`
    pub fn check_user_at<H: KeysetHandle>(
        &self,
        user: Option<&User<H>>,
        now: Timestamp,
    ) -> Result<Vec<KeyInfo>, CheckError> {
        let user = user.ok_or(CheckError::InvalidArgument)?;
        let Some(handle) = user.authorized_keys.as_ref() else {
            tracing::debug!(user_id = %user.user_id, "no authorized keys");
            return Ok(Vec::new());
        };

        let info = handle.keyset_info().context(ResolutionSnafu)?;

        info.keys
            .iter()
            .map(|key| {
                let expire_time = self.lookup.expiration(key, now).context(LookupSnafu)?;
                let key_info = KeyInfo::evaluate(key.key_id, expire_time, now, &self.config);
                tracing::debug!(
                    user_id = %user.user_id,
                    key_id = key_info.key_id,
                    status = %key_info.status,
                    days_left = key_info.days_left,
                    "checked key"
                );
                Ok(key_info)
            })
            .collect()
    }
}
