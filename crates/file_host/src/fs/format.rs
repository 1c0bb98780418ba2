//! Display formatting for listing rows.

use chrono::{DateTime, FixedOffset, Offset, Utc};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const DAY_MS: f64 = 86_400_000.0;

/// Formats a byte count with base-1024 units and at most one decimal.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0} {}", SIZE_UNITS[unit])
    } else {
        format!("{rounded:.1} {}", SIZE_UNITS[unit])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Relative-day bucket used by [`format_modified`].
pub enum ModifiedBucket {
    /// Less than one whole day ago (or in the future).
    Today,
    /// One whole day ago.
    Yesterday,
    /// Two to six whole days ago.
    DaysAgo(u32),
    /// Seven or more days ago.
    Older,
}

/// Buckets a unix-seconds timestamp relative to `now_ms` by whole elapsed days.
pub fn modified_bucket(timestamp_secs: f64, now_ms: f64) -> ModifiedBucket {
    let days = ((now_ms - timestamp_secs * 1000.0) / DAY_MS).floor();
    if days < 1.0 {
        ModifiedBucket::Today
    } else if days < 2.0 {
        ModifiedBucket::Yesterday
    } else if days < 7.0 {
        ModifiedBucket::DaysAgo(days as u32)
    } else {
        ModifiedBucket::Older
    }
}

/// Formats a modification time as a short human label.
///
/// `utc_offset_minutes` is the local offset east of UTC used for the clock and calendar forms.
pub fn format_modified(timestamp_secs: f64, now_ms: f64, utc_offset_minutes: i32) -> String {
    match modified_bucket(timestamp_secs, now_ms) {
        ModifiedBucket::Today => local_time(timestamp_secs, utc_offset_minutes, "%H:%M"),
        ModifiedBucket::Yesterday => "Yesterday".to_string(),
        ModifiedBucket::DaysAgo(days) => format!("{days} days ago"),
        ModifiedBucket::Older => local_time(timestamp_secs, utc_offset_minutes, "%b %-d"),
    }
}

fn local_time(timestamp_secs: f64, utc_offset_minutes: i32, pattern: &str) -> String {
    let offset = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60))
        .unwrap_or_else(|| Utc.fix());
    match DateTime::<Utc>::from_timestamp_millis((timestamp_secs * 1000.0) as i64) {
        Some(utc) => utc.with_timezone(&offset).format(pattern).to_string(),
        None => String::new(),
    }
}
