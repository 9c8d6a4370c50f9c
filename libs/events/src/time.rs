//! Event timestamps.

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The instant an event was generated, in UTC with millisecond precision.
///
/// `EventTime` is a `Copy` value: every accessor hands out its own copy, so
/// adjusting a returned time never changes the event it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventTime(DateTime<Utc>);

impl EventTime {
    /// 1970-01-01T00:00:00Z, used by placeholder events.
    pub const UNIX_EPOCH: Self = Self(DateTime::<Utc>::UNIX_EPOCH);

    /// Creates an event time, truncating anything finer than a millisecond.
    #[must_use]
    pub fn new(instant: DateTime<Utc>) -> Self {
        let millis = instant.timestamp_subsec_millis() * 1_000_000;
        Self(instant.with_nanosecond(millis).unwrap_or(instant))
    }

    /// Creates an event time from milliseconds since the Unix epoch.
    ///
    /// Returns `None` if the value is outside the representable range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// The current time.
    #[must_use]
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The time as a UTC date-time.
    #[must_use]
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns this time shifted by `delta`, or `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, delta: Duration) -> Option<Self> {
        self.0.checked_add_signed(delta).map(Self::new)
    }
}

impl Default for EventTime {
    fn default() -> Self {
        Self::UNIX_EPOCH
    }
}

impl From<DateTime<Utc>> for EventTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::new(instant)
    }
}

impl From<EventTime> for DateTime<Utc> {
    fn from(time: EventTime) -> Self {
        time.0
    }
}

impl std::fmt::Display for EventTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        )
    }
}

impl Serialize for EventTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EventTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        DateTime::<Utc>::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_to_millis() {
        let instant = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let time = EventTime::new(instant);
        assert_eq!(time.millis(), 1_700_000_000_123);
        assert_eq!(time.as_datetime().timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_from_millis() {
        let time = EventTime::from_millis(1_704_067_200_000).unwrap();
        assert_eq!(time.to_string(), "2024-01-01T00:00:00.000Z");
        assert_eq!(EventTime::from_millis(i64::MAX), None);
    }

    #[test]
    fn test_default_is_epoch() {
        assert_eq!(EventTime::default().millis(), 0);
    }

    #[test]
    fn test_returned_copy_is_independent() {
        let original = EventTime::from_millis(1_000).unwrap();
        let mut copy = original;
        copy = copy.checked_add(Duration::hours(1)).unwrap();
        assert_eq!(original.millis(), 1_000);
        assert_eq!(copy.millis(), 3_601_000);
    }

    #[test]
    fn test_json_roundtrip() {
        let time = EventTime::from_millis(1_704_067_200_250).unwrap();
        let json = serde_json::to_string(&time).unwrap();
        let parsed: EventTime = serde_json::from_str(&json).unwrap();
        assert_eq!(time, parsed);
    }
}
