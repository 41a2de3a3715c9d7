//! GPIO pin abstractions
//!
//! Button lines are read as raw levels; the active-low convention of the
//! panel's pull-up wiring is applied through [`Polarity`], not by the pin.

/// Digital output pin driving an indicator
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Check whether the line is in its asserted state
    fn is_asserted(&self, polarity: Polarity) -> bool {
        match polarity {
            Polarity::ActiveHigh => self.is_high(),
            Polarity::ActiveLow => self.is_low(),
        }
    }
}

/// Which electrical level means "asserted" on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveHigh,
    /// Pull-up biased switch to ground (panel buttons)
    #[default]
    ActiveLow,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPin(bool);

    impl InputPin for FixedPin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_active_low_asserted_when_low() {
        assert!(FixedPin(false).is_asserted(Polarity::ActiveLow));
        assert!(!FixedPin(true).is_asserted(Polarity::ActiveLow));
    }

    #[test]
    fn test_active_high_asserted_when_high() {
        assert!(FixedPin(true).is_asserted(Polarity::ActiveHigh));
        assert!(!FixedPin(false).is_asserted(Polarity::ActiveHigh));
    }

    #[test]
    fn test_default_polarity_is_active_low() {
        assert_eq!(Polarity::default(), Polarity::ActiveLow);
    }
}
