//! Status LEDs
//!
//! Two LEDs show which mode the alarm unit has confirmed. When the link is
//! failing they blink together instead.

pub mod indicator;

pub use indicator::{LedIndicator, LedLevels};
