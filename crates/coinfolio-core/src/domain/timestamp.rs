use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::ValidationError;

/// Exchange timestamp, always in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Parse an RFC3339 timestamp with a `Z` (or `+00:00`) offset.
    /// Fractional seconds are kept.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        OffsetDateTime::parse(input, &Rfc3339)
            .ok()
            .filter(|parsed| parsed.offset() == UtcOffset::UTC)
            .map(Self)
            .ok_or_else(|| ValidationError::TimestampNotUtc {
                value: input.to_owned(),
            })
    }

    /// Whole seconds since the Unix epoch, as sent in request signatures.
    pub fn unix_timestamp(self) -> i64 {
        self.0.unix_timestamp()
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let formatted = self.0.format(&Rfc3339).map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_timestamps_keep_fractional_seconds() {
        let parsed = UtcDateTime::parse("2023-04-14T17:18:13.531Z").expect("must parse");
        assert_eq!(parsed.unix_timestamp(), 1_681_492_693);
        assert_eq!(parsed.to_string(), "2023-04-14T17:18:13.531Z");
    }

    #[test]
    fn offsets_other_than_utc_are_rejected() {
        for input in ["2024-01-01T01:00:00+01:00", "yesterday", ""] {
            let error = UtcDateTime::parse(input).expect_err("must fail");
            assert!(matches!(error, ValidationError::TimestampNotUtc { .. }));
        }
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let parsed = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("must parse");
        assert_eq!(
            serde_json::to_value(parsed).expect("serializable"),
            serde_json::json!("2024-01-01T00:00:00Z")
        );
    }
}
