//! Clock helpers for relative timestamp formatting.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as f64
    }
}

/// Returns the local UTC offset in minutes east of UTC.
///
/// Non-browser targets report UTC.
pub fn local_utc_offset_minutes() -> i32 {
    #[cfg(target_arch = "wasm32")]
    {
        // getTimezoneOffset() is minutes *behind* UTC.
        -(js_sys::Date::new_0().get_timezone_offset() as i32)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        0
    }
}
