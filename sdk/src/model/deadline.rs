//! Network timestamps.
//!
//! Deadlines are milliseconds since the network epoch (2016-04-01 UTC), not
//! the Unix epoch. On the wire they are a little-endian `u64`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::fmt;

use crate::config::NETWORK_EPOCH_MS;
use crate::error::SdkError;

/// Point in network time after which a transaction is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Deadline(u64);

impl Deadline {
    /// Wraps a raw network timestamp (ms since the network epoch).
    pub const fn from_network_timestamp(timestamp: u64) -> Self {
        Self(timestamp)
    }

    /// A deadline `duration` from now.
    pub fn after(duration: Duration) -> Result<Self, SdkError> {
        Self::from_datetime(Utc::now() + duration)
    }

    /// Converts a wall-clock instant into network time.
    pub fn from_datetime(at: DateTime<Utc>) -> Result<Self, SdkError> {
        let ms = at.timestamp_millis() - NETWORK_EPOCH_MS;
        if ms < 0 {
            return Err(SdkError::structural(
                "deadline",
                format!("{at} precedes the network epoch"),
            ));
        }
        Ok(Self(ms as u64))
    }

    pub fn to_network_timestamp(&self) -> u64 {
        self.0
    }

    /// Wall-clock instant of this deadline.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let unix_ms = i64::try_from(self.0).ok()?.checked_add(NETWORK_EPOCH_MS)?;
        Utc.timestamp_millis_opt(unix_ms).single()
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(at) => write!(f, "{}", at.to_rfc3339()),
            None => write!(f, "network+{}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_zero() {
        let epoch = Utc.with_ymd_and_hms(2016, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(Deadline::from_datetime(epoch).unwrap().to_network_timestamp(), 0);
    }

    #[test]
    fn before_epoch_is_rejected() {
        let early = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap();
        assert!(Deadline::from_datetime(early).is_err());
    }

    #[test]
    fn after_is_in_the_future() {
        let now = Deadline::from_datetime(Utc::now()).unwrap();
        let later = Deadline::after(Duration::hours(1)).unwrap();
        assert!(later > now);
        let delta = later.to_network_timestamp() - now.to_network_timestamp();
        assert!((3_599_000..=3_601_000).contains(&delta));
    }

    #[test]
    fn datetime_roundtrip() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let deadline = Deadline::from_datetime(at).unwrap();
        assert_eq!(deadline.to_datetime().unwrap(), at);
    }
}
