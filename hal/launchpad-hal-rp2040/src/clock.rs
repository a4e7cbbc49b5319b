//! Millisecond clock backed by the embassy time driver

use embassy_time::Instant;
use launchpad_hal::MonotonicClock;

/// Milliseconds since boot, truncated to 32 bits
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping counter consumers expect
        Instant::now().as_millis() as u32
    }
}
