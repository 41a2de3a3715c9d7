//! Button and LED pins
//!
//! Buttons are wired to ground with the internal pull-up enabled, so a
//! pressed button reads low. LEDs are driven active-high.

use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::Peri;
use vigil_hal::{InputPin, OutputPin};

/// Mode button input
pub struct ButtonInput<'d> {
    input: Input<'d>,
}

impl<'d> ButtonInput<'d> {
    /// Configure `pin` as a pulled-up input
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            input: Input::new(pin, Pull::Up),
        }
    }
}

impl InputPin for ButtonInput<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}

/// Status LED output
pub struct LedOutput<'d> {
    output: Output<'d>,
}

impl<'d> LedOutput<'d> {
    /// Configure `pin` as an output, initially unlit
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            output: Output::new(pin, Level::Low),
        }
    }
}

impl OutputPin for LedOutput<'_> {
    fn set_high(&mut self) {
        self.output.set_high();
    }

    fn set_low(&mut self) {
        self.output.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.output.is_set_high()
    }
}
