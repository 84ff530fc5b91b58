use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serializer};
use snafu::{ResultExt, Snafu};
use std::str::FromStr;

pub(crate) mod required {
    use super::*;

    pub fn serialize<S>(timestamp: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(timestamp)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Owned string, some formats cannot hand out borrowed slices (ex: `ciborium`)
        let string = String::deserialize(deserializer)?;
        Timestamp::from_str(&string).map_err(serde::de::Error::custom)
    }
}

pub(crate) mod optional {
    use super::*;

    pub fn serialize<S>(optional: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match optional {
            Some(ref value) => serializer.serialize_some(&value.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|string| Timestamp::from_str(&string).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("timestamp {timestamp} is out of range"))]
/// Error while turning a number of seconds since the unix epoch into a timestamp
pub struct TimestampError {
    timestamp: i64,
    source: jiff::Error,
}

pub(crate) fn parse_timestamp(timestamp: i64) -> Result<Timestamp, TimestampError> {
    Timestamp::from_second(timestamp).context(TimestampSnafu { timestamp })
}

/// Calendar date of a timestamp, `YYYY-MM-DD` in UTC
pub(crate) fn format_date(timestamp: Timestamp) -> String {
    timestamp.strftime("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize, Deserialize)]
    struct Required {
        #[serde(with = "crate::timestamp::required")]
        at: Timestamp,
    }

    #[derive(serde::Serialize, Deserialize)]
    struct Optional {
        #[serde(with = "crate::timestamp::optional")]
        at: Option<Timestamp>,
    }

    #[test]
    fn required_rejects_garbage() {
        let test: Result<Required, _> = serde_json::from_str(r#"{"at": "next tuesday"}"#);
        assert!(test.is_err());

        let test: Result<Required, _> = serde_json::from_str(r#"{"at": null}"#);
        assert!(test.is_err());
    }

    #[test]
    fn required_parses_rfc3339() {
        let test: Required = serde_json::from_str(r#"{"at": "2025-03-01T08:00:00Z"}"#).unwrap();
        assert_eq!(test.at.as_second(), 1740816000);

        let json = serde_json::to_string(&test).unwrap();
        assert_eq!(json, r#"{"at":"2025-03-01T08:00:00Z"}"#);
    }

    #[test]
    fn optional_accepts_null() {
        let test: Optional = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(test.at.is_none());
        assert_eq!(serde_json::to_string(&test).unwrap(), r#"{"at":null}"#);

        let test: Result<Optional, _> = serde_json::from_str(r#"{"at": "yesterday"}"#);
        assert!(test.is_err());

        let test: Optional = serde_json::from_str(r#"{"at": "2025-03-01T08:00:00Z"}"#).unwrap();
        assert_eq!(test.at.map(|t| t.as_second()), Some(1740816000));
    }

    #[test]
    fn out_of_range_seconds() {
        assert!(parse_timestamp(i64::MAX).is_err());
        assert_eq!(parse_timestamp(0).unwrap(), Timestamp::UNIX_EPOCH);
    }

    #[test]
    fn date_is_utc_calendar_day() {
        // 23:30 UTC stays on the same day whatever the local zone is
        let timestamp: Timestamp = "2025-06-15T23:30:00Z".parse().unwrap();
        assert_eq!(format_date(timestamp), "2025-06-15");

        let timestamp: Timestamp = "1999-01-02T00:00:00Z".parse().unwrap();
        assert_eq!(format_date(timestamp), "1999-01-02");
    }
}
