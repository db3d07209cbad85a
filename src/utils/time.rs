use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since UNIX epoch, used to stamp snapshots.
///
/// A clock set before the epoch yields 0.
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
