//! Configuration type definitions

use vigil_hal::UartConfig;

/// Time a request may stay unanswered before the session is in overtime
pub const OVERTIME_MS: u64 = 5_000;

/// Half-period of the failure blink
pub const BLINK_INTERVAL_MS: u64 = 1_000;

/// How long OFF keeps both LEDs lit after finalizing
pub const OFF_GRACE_MS: u64 = 2_000;

/// Consecutive mismatched replies tolerated before the panel blinks
pub const MISMATCH_LIMIT: u8 = 10;

/// Timing windows, all in milliseconds of the monotonic clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Reply timeout for an outstanding request
    pub overtime_ms: u64,
    /// Interval between LED toggles while blinking
    pub blink_interval_ms: u64,
    /// OFF grace period after the finalize byte
    pub off_grace_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            overtime_ms: OVERTIME_MS,
            blink_interval_ms: BLINK_INTERVAL_MS,
            off_grace_ms: OFF_GRACE_MS,
        }
    }
}

impl Timing {
    /// Overtime and blink windows must be non-zero; the grace window may be
    /// zero (LEDs go dark right after finalize).
    pub fn is_valid(&self) -> bool {
        self.overtime_ms > 0 && self.blink_interval_ms > 0
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// Timing windows
    pub timing: Timing,
    /// Strict mode: blink once this many consecutive mismatches are exceeded.
    /// `None` disables mismatch counting as a failure signal.
    pub mismatch_limit: Option<u8>,
    /// Serial link format
    pub serial: UartConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            timing: Timing::default(),
            mismatch_limit: Some(MISMATCH_LIMIT),
            serial: UartConfig::default(),
        }
    }
}

impl PanelConfig {
    /// Check whether `mismatches` consecutive bad replies should blink the LEDs
    pub fn mismatch_exceeded(&self, mismatches: u8) -> bool {
        matches!(self.mismatch_limit, Some(limit) if mismatches > limit)
    }
}
