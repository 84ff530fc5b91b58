use crate::timestamp::TimestampError;
use jiff::Timestamp;

/// Bookkeeping stored next to every key of a keyset
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct Metadata<C> {
    #[serde(with = "crate::timestamp::required")]
    pub(crate) created_at: Timestamp,

    #[serde(default, with = "crate::timestamp::optional")]
    pub(crate) expired_at: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) comment: Option<C>,
}

impl<C> Default for Metadata<C> {
    fn default() -> Self {
        Self {
            created_at: Timestamp::now(),
            expired_at: None,
            comment: None,
        }
    }
}

impl<C> Metadata<C> {
    pub fn with_comment(mut self, comment: C) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn with_expiration(mut self, timestamp: i64) -> Result<Self, TimestampError> {
        let timestamp = crate::timestamp::parse_timestamp(timestamp)?;
        self.expired_at = Some(timestamp);
        Ok(self)
    }
}
