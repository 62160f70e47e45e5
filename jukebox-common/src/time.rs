//! Timestamp utilities
//!
//! Catalog timestamps are persisted as integer milliseconds since the epoch,
//! so in-memory values are kept at millisecond precision as well.

use chrono::{DateTime, TimeZone, Utc};

/// Get current UTC timestamp, truncated to millisecond precision
pub fn now() -> DateTime<Utc> {
    from_millis(Utc::now().timestamp_millis())
}

/// Convert epoch milliseconds to a UTC timestamp
///
/// Out-of-range values clamp to the Unix epoch.
pub fn from_millis(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
