//! Timestamp formatting shared by every stored record.
//!
//! Timestamps are written as RFC 3339 with exactly nine fractional digits and a
//! `Z` suffix, e.g. `2024-01-15T10:30:00.000000000Z`. The fixed width keeps the
//! lexicographic order of the strings identical to chronological order, which
//! is what the key-value store compares in conditional writes.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format a timestamp in the stored representation.
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse a stored timestamp. Any RFC 3339 offset is accepted and normalized to UTC.
pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

/// Serialize a timestamp in the stored representation.
///
/// Use with `#[serde(with = "customers_core::timestamp")]`.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

/// Deserialize a timestamp written by [`serialize`] (or any RFC 3339 string).
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(with = "crate::timestamp")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_format_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(format(&whole), "2024-01-15T12:00:00.000000000Z");

        let fractional = whole + chrono::Duration::milliseconds(250);
        assert_eq!(format(&fractional), "2024-01-15T12:00:00.250000000Z");
    }

    #[test]
    fn test_string_order_matches_time_order() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let later = earlier + chrono::Duration::nanoseconds(1);
        let much_later = earlier + chrono::Duration::seconds(1);

        assert!(format(&earlier) < format(&later));
        assert!(format(&later) < format(&much_later));
    }

    #[test]
    fn test_parse_normalizes_offset() {
        let parsed = parse("2024-01-15T14:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("yesterday").is_err());
    }

    #[test]
    fn test_serde_keeps_nanoseconds() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let json = serde_json::to_string(&Stamped { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-01-15T12:00:00.123456789Z"}"#);

        let back: Stamped = serde_json::from_str(&json).unwrap();
        assert_eq!(back.at, at);
    }
}
