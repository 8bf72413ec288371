//! Backoff helpers shared by anything that needs to space out retries.

use std::time::Duration;

use crate::core::constants::{BACKOFF_BASE_MS, BACKOFF_MAX_MS};

/// The Topic Supervisor's reconnect backoff: `min(60_000, 1000 * 2^(attempts-1))`
/// milliseconds. `attempts` is 1-indexed (the first reconnect attempt passes 1).
pub fn backoff_delay(attempts: u32) -> Duration {
    let exp = attempts.saturating_sub(1).min(63);
    let delay_ms = BACKOFF_BASE_MS.saturating_mul(1u64 << exp).min(BACKOFF_MAX_MS);
    Duration::from_millis(delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_delay_follows_formula() {
        assert_eq!(backoff_delay(1), Duration::from_millis(1_000));
        assert_eq!(backoff_delay(2), Duration::from_millis(2_000));
        assert_eq!(backoff_delay(3), Duration::from_millis(4_000));
    }

    #[test]
    fn backoff_delay_caps_at_max() {
        assert_eq!(backoff_delay(20), Duration::from_millis(BACKOFF_MAX_MS));
    }
}
