//! Time utilities: consensus-timestamp encoding and the wall-clock
//! conversions COMMS payloads need.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// The substrate's canonical ordering key: a rational nanosecond instant
/// encoded textually as `seconds.nanoseconds`, nanoseconds zero-padded to
/// nine digits so lexicographic order equals chronological order. This is
/// the one place that zero-padding rule is implemented; every caller goes
/// through `Display`/`FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConsensusTimestamp {
    seconds: i64,
    nanos: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseConsensusTimestampError {
    #[error("expected \"seconds.nanoseconds\", got {0:?}")]
    MalformedInput(String),
    #[error("invalid seconds component: {0}")]
    InvalidSeconds(String),
    #[error("invalid nanoseconds component: {0}")]
    InvalidNanos(String),
}

impl ConsensusTimestamp {
    pub fn new(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    /// The start-timestamp adjustment the Push Subscriber always applies:
    /// add one nanosecond so a live subscription excludes the last message
    /// already materialized by backfill, regardless of whether the mirror
    /// node's own `gt` semantics are inclusive or exclusive.
    pub fn next(self) -> Self {
        let total_nanos = self.nanos + 1;
        if total_nanos >= NANOS_PER_SEC {
            Self {
                seconds: self.seconds + 1,
                nanos: total_nanos - NANOS_PER_SEC,
            }
        } else {
            Self {
                seconds: self.seconds,
                nanos: total_nanos,
            }
        }
    }
}

impl fmt::Display for ConsensusTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}

impl FromStr for ConsensusTimestamp {
    type Err = ParseConsensusTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (secs_part, nanos_part) = s
            .split_once('.')
            .ok_or_else(|| ParseConsensusTimestampError::MalformedInput(s.to_string()))?;

        let seconds = secs_part
            .parse::<i64>()
            .map_err(|_| ParseConsensusTimestampError::InvalidSeconds(secs_part.to_string()))?;
        let nanos = nanos_part
            .parse::<u32>()
            .map_err(|_| ParseConsensusTimestampError::InvalidNanos(nanos_part.to_string()))?;

        Ok(Self { seconds, nanos })
    }
}

/// Convert nanoseconds since Unix epoch to DateTime<Utc>
pub fn nanos_to_datetime(nanos: u64) -> DateTime<Utc> {
    let secs = (nanos / 1_000_000_000) as i64;
    let nsecs = (nanos % 1_000_000_000) as u32;
    DateTime::from_timestamp(secs, nsecs).unwrap_or_else(|| {
        tracing::warn!(nanos, "invalid timestamp, using epoch");
        DateTime::UNIX_EPOCH
    })
}

/// Parse an ISO-8601 / RFC-3339 timestamp string, the shape COMMS carries.
pub fn parse_iso_timestamp(ts: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| {
            tracing::warn!(ts, "invalid ISO timestamp, using epoch");
            DateTime::UNIX_EPOCH
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn display_zero_pads_nanos() {
        let ts = ConsensusTimestamp::new(1_700_000_000, 5);
        assert_eq!(ts.to_string(), "1700000000.000000005");
    }

    #[test]
    fn roundtrips_through_display_and_parse() {
        let ts = ConsensusTimestamp::new(1_700_000_001, 123_456_789);
        let parsed: ConsensusTimestamp = ts.to_string().parse().unwrap();
        assert_eq!(ts, parsed);
    }

    #[test]
    fn next_increments_nanos() {
        let ts = ConsensusTimestamp::new(10, 0);
        assert_eq!(ts.next(), ConsensusTimestamp::new(10, 1));
    }

    #[test]
    fn next_carries_into_seconds() {
        let ts = ConsensusTimestamp::new(10, 999_999_999);
        assert_eq!(ts.next(), ConsensusTimestamp::new(11, 0));
    }

    #[test]
    fn ordering_matches_lexicographic_string_order() {
        let a = ConsensusTimestamp::new(100, 999_999_999);
        let b = ConsensusTimestamp::new(101, 0);
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("not-a-timestamp".parse::<ConsensusTimestamp>().is_err());
        assert!("123".parse::<ConsensusTimestamp>().is_err());
    }

    #[test]
    fn nanos_to_datetime_known_value() {
        let nanos = 1_704_067_200_u64 * 1_000_000_000;
        let dt = nanos_to_datetime(nanos);
        assert_eq!(dt.year(), 2024);
    }

    #[test]
    fn parse_iso_timestamp_valid() {
        let dt = parse_iso_timestamp("2024-01-15T10:30:00Z");
        assert_eq!(dt.year(), 2024);
    }

    #[test]
    fn parse_iso_timestamp_invalid_falls_back_to_epoch() {
        let dt = parse_iso_timestamp("not-a-timestamp");
        assert_eq!(dt, DateTime::UNIX_EPOCH);
    }
}
