use chrono::{DateTime, Utc};

/// Wall-clock milliseconds since the Unix epoch (browser clock on wasm).
pub fn current_time_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

fn to_datetime(timestamp: u64) -> Option<DateTime<Utc>> {
    i64::try_from(timestamp).ok().and_then(DateTime::from_timestamp_millis)
}

/// Axis tick label, `M/D/YYYY` in UTC.
pub fn format_date_label(timestamp: u64) -> String {
    to_datetime(timestamp).map(|dt| dt.format("%-m/%-d/%Y").to_string()).unwrap_or_default()
}

/// Tooltip label, `M/D/YYYY, h:MM:SS AM` in UTC.
pub fn format_datetime_label(timestamp: u64) -> String {
    to_datetime(timestamp)
        .map(|dt| dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string())
        .unwrap_or_default()
}

/// `HH:MM:SS.mmm` in UTC, used for log lines.
pub fn format_clock(timestamp: u64) -> String {
    to_datetime(timestamp).map(|dt| dt.format("%H:%M:%S%.3f").to_string()).unwrap_or_default()
}
