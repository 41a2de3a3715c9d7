//! Edge latching for the mode buttons

use crate::state::Mode;

/// One button and the mode it selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonChannel {
    mode: Mode,
    held: bool,
}

impl ButtonChannel {
    pub const fn new(mode: Mode) -> Self {
        Self { mode, held: false }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True between a press edge and the following release
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Feed the current (already polarity-corrected) line state
    ///
    /// Returns the channel's mode on the press edge only.
    pub fn update(&mut self, asserted: bool) -> Option<Mode> {
        match (asserted, self.held) {
            (true, false) => {
                self.held = true;
                Some(self.mode)
            }
            (false, _) => {
                self.held = false;
                None
            }
            (true, true) => None,
        }
    }
}

/// Samples all three buttons once per loop iteration
#[derive(Debug, Clone)]
pub struct InputSampler {
    channels: [ButtonChannel; 3],
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSampler {
    /// Buttons 1, 2, 3 select MONITOR, PANIC, OFF
    pub fn new() -> Self {
        Self {
            channels: Mode::ALL.map(ButtonChannel::new),
        }
    }

    pub fn channels(&self) -> &[ButtonChannel; 3] {
        &self.channels
    }

    /// Update every channel and return at most one mode request
    ///
    /// All channels are updated even when an earlier one fired, so latches
    /// stay consistent. With simultaneous edges the last channel in button
    /// order wins.
    pub fn sample(&mut self, asserted: [bool; 3]) -> Option<Mode> {
        let mut request = None;
        for (channel, level) in self.channels.iter_mut().zip(asserted) {
            if let Some(mode) = channel.update(level) {
                request = Some(mode);
            }
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_fires_once() {
        let mut channel = ButtonChannel::new(Mode::Panic);
        assert_eq!(channel.update(true), Some(Mode::Panic));
        assert!(channel.is_held());
        assert_eq!(channel.update(true), None);
        assert_eq!(channel.update(true), None);
    }

    #[test]
    fn test_release_rearms() {
        let mut channel = ButtonChannel::new(Mode::Off);
        channel.update(true);
        assert_eq!(channel.update(false), None);
        assert!(!channel.is_held());
        assert_eq!(channel.update(true), Some(Mode::Off));
    }

    #[test]
    fn test_channel_order() {
        let sampler = InputSampler::new();
        let modes: [Mode; 3] = sampler.channels().map(|c| c.mode());
        assert_eq!(modes, [Mode::Monitor, Mode::Panic, Mode::Off]);
    }

    #[test]
    fn test_idle_lines_request_nothing() {
        let mut sampler = InputSampler::new();
        assert_eq!(sampler.sample([false; 3]), None);
    }

    #[test]
    fn test_simultaneous_press_last_channel_wins() {
        let mut sampler = InputSampler::new();
        assert_eq!(sampler.sample([true, true, false]), Some(Mode::Panic));

        let mut sampler = InputSampler::new();
        assert_eq!(sampler.sample([true, true, true]), Some(Mode::Off));
    }

    #[test]
    fn test_held_button_does_not_mask_new_edge() {
        let mut sampler = InputSampler::new();
        sampler.sample([false, false, true]);
        // OFF still held, MONITOR newly pressed
        assert_eq!(sampler.sample([true, false, true]), Some(Mode::Monitor));
        assert!(sampler.channels()[0].is_held());
        assert!(sampler.channels()[2].is_held());
    }
}
