//! Monotonic clock backed by the embassy time driver

use embassy_time::Instant;
use vigil_hal::Monotonic;

/// Milliseconds since boot from the RP2040 timer
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl EmbassyClock {
    pub const fn new() -> Self {
        Self
    }
}

impl Monotonic for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
