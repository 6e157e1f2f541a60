//! Delay unit inference and clamped pauses.
//!
//! A numeric delay above 999 is read as microseconds so short test delays
//! can run sub-second; anything else is seconds. Both interpretations are
//! clamped (1 s of microseconds, 10 s of seconds) so an untrusted client
//! cannot hold a request open indefinitely.

use std::time::Duration;

/// Values above this threshold are interpreted as microseconds.
const MICROS_THRESHOLD: f64 = 999.0;
/// Microsecond delays cap out at one second.
const MAX_MICROS: f64 = 1_000_000.0;
/// Second delays cap out at ten seconds.
const MAX_SECONDS: f64 = 10.0;

/// Translate a raw delay value into a bounded [`Duration`].
pub fn interpret(value: f64) -> Duration {
    if value > MICROS_THRESHOLD {
        Duration::from_micros(value.min(MAX_MICROS) as u64)
    } else {
        Duration::from_secs_f64(value.max(0.0).min(MAX_SECONDS))
    }
}

/// Sleep for the inferred, clamped duration. Only the current request's
/// task is suspended.
pub async fn pause(value: f64) {
    let duration = interpret(value);
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
