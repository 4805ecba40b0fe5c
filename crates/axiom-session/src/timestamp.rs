//! Millisecond timestamps

use chrono::{DateTime, Utc};

/// Milliseconds since the Unix epoch
pub type Timestamp = u64;

pub fn now() -> Timestamp {
    // Clocks before 1970 clamp to zero
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

pub fn to_datetime(timestamp: Timestamp) -> Option<DateTime<Utc>> {
    let millis = i64::try_from(timestamp).ok()?;
    DateTime::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(now() > 1_577_836_800_000);
    }

    #[test]
    fn test_to_datetime() {
        let dt = to_datetime(1_577_836_800_000).unwrap();
        assert_eq!(dt.to_rfc3339(), "2020-01-01T00:00:00+00:00");
        assert!(to_datetime(u64::MAX).is_none());
    }
}
