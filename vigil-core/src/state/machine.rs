//! Mode definition and transition bookkeeping

use super::events::Event;

/// Panel operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Alarm unit watches its sensors
    Monitor,
    /// Alarm raised
    Panic,
    /// Alarm unit stood down
    Off,
}

impl Mode {
    /// All modes, in button channel order (button 1, 2, 3)
    pub const ALL: [Mode; 3] = [Mode::Monitor, Mode::Panic, Mode::Off];

    /// Process an event and return the next mode
    ///
    /// Buttons always win, including a press for the mode already active.
    /// Peer escalation is only honoured from MONITOR to PANIC.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Mode::*;

        match (self, event) {
            (_, ButtonPressed(requested)) => requested,
            (Monitor, PeerEscalation(Panic)) => Panic,

            // Default: stay in current mode
            _ => self,
        }
    }
}

/// A change of the active mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
}

/// Current/previous mode pair
///
/// Events update `current` immediately. [`ModeMachine::settle`] is called
/// once per loop iteration, before the mode handler runs, and reports the
/// change (if any) since the previous iteration.
#[derive(Debug, Clone)]
pub struct ModeMachine {
    current: Mode,
    previous: Mode,
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeMachine {
    /// Power-on state: OFF
    pub fn new() -> Self {
        Self::with_initial(Mode::Off)
    }

    pub fn with_initial(mode: Mode) -> Self {
        Self {
            current: mode,
            previous: mode,
        }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    pub fn previous(&self) -> Mode {
        self.previous
    }

    /// Apply an event; returns the (possibly unchanged) current mode
    pub fn handle(&mut self, event: Event) -> Mode {
        self.current = self.current.transition(event);
        self.current
    }

    /// Acknowledge the current mode for this iteration
    ///
    /// Returns the transition if the mode differs from the one the previous
    /// iteration ran; `previous` catches up either way.
    pub fn settle(&mut self) -> Option<Transition> {
        if self.current == self.previous {
            return None;
        }
        let transition = Transition {
            from: self.previous,
            to: self.current,
        };
        self.previous = self.current;
        Some(transition)
    }
}
