//! Conversion between Core Data timestamps and standard time.
//!
//! Bear stores dates as seconds (with a fractional part) counted from
//! 2001-01-01T00:00:00Z. Values are normalized to microsecond resolution so a
//! round trip through [`to_store_native`] and back yields the same instant.

use chrono::{DateTime, Duration, Utc};

/// Seconds between the Unix epoch and the Core Data reference date.
pub const CORE_DATA_EPOCH_OFFSET: i64 = 978_307_200;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Convert a store-native timestamp to a UTC datetime.
///
/// `None` stays `None`. Non-finite or out-of-range values also map to `None`.
pub fn to_standard(timestamp: Option<f64>) -> Option<DateTime<Utc>> {
    let seconds = timestamp?;
    if !seconds.is_finite() {
        return None;
    }
    let offset_micros = CORE_DATA_EPOCH_OFFSET * 1_000_000;
    let micros = (seconds * MICROS_PER_SECOND).round() as i64;
    DateTime::from_timestamp_micros(micros.checked_add(offset_micros)?)
}

/// Convert a UTC datetime to a store-native timestamp.
pub fn to_store_native(datetime: DateTime<Utc>) -> f64 {
    let micros = datetime.timestamp_micros() - CORE_DATA_EPOCH_OFFSET * 1_000_000;
    micros as f64 / MICROS_PER_SECOND
}

/// Store-native threshold for "modified within the last `days` days".
pub fn cutoff_days_ago(now: DateTime<Utc>, days: u32) -> f64 {
    to_store_native(now - Duration::days(i64::from(days)))
}
