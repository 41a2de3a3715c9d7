//! LED pattern rendering

/// Output level of both LEDs (`true` = lit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedLevels {
    pub led1: bool,
    pub led2: bool,
}

impl LedLevels {
    pub const DARK: Self = Self::new(false, false);
    pub const BOTH: Self = Self::new(true, true);
    pub const FIRST_ONLY: Self = Self::new(true, false);
    pub const SECOND_ONLY: Self = Self::new(false, true);

    pub const fn new(led1: bool, led2: bool) -> Self {
        Self { led1, led2 }
    }

    /// Levels in pin order
    pub const fn as_array(self) -> [bool; 2] {
        [self.led1, self.led2]
    }
}

/// Stored LED state
///
/// Only the last rendered levels and the time of the last blink toggle are
/// kept; everything else is derived from the mode and the handshake session
/// on every iteration.
#[derive(Debug, Clone, Default)]
pub struct LedIndicator {
    levels: LedLevels,
    last_toggle_at: u64,
}

impl LedIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Levels produced by the last [`render`](Self::render)
    pub fn levels(&self) -> LedLevels {
        self.levels
    }

    pub fn last_toggle_at(&self) -> u64 {
        self.last_toggle_at
    }

    /// Compute the levels to drive for this iteration
    ///
    /// While `failing`, LED1 toggles once `blink_interval_ms` has elapsed
    /// since the previous toggle and LED2 always follows LED1. Otherwise the
    /// `normal` pattern is shown as is.
    pub fn render(
        &mut self,
        normal: LedLevels,
        failing: bool,
        now: u64,
        blink_interval_ms: u64,
    ) -> LedLevels {
        self.levels = if failing {
            let mut led = self.levels.led1;
            if now.saturating_sub(self.last_toggle_at) >= blink_interval_ms {
                led = !led;
                self.last_toggle_at = now;
            }
            LedLevels::new(led, led)
        } else {
            normal
        };
        self.levels
    }
}
