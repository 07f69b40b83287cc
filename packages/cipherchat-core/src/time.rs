//! Time utilities.
//!
//! Timestamps are UTC Unix seconds from `chrono::Utc::now()`.

/// Returns the current Unix timestamp in seconds.
pub fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
