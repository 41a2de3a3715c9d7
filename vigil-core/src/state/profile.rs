//! What each mode does once it is active
//!
//! All three modes run the same handler; the differences are data.

use vigil_protocol::Message;

use super::machine::Mode;
use crate::handshake::{Escalation, Exchange, HandshakeSession};
use crate::led::LedLevels;

/// Action taken after the mode's handshake is confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OnConfirmed {
    /// Keep the steady LED pattern until the mode changes
    Hold,
    /// Send this one-way message once, then run the grace window
    Finalize(Message),
}

/// Handshake and LED behavior of a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeProfile {
    pub exchange: Exchange,
    pub on_confirmed: OnConfirmed,
    /// Steady pattern shown while the link is healthy
    pub leds: LedLevels,
}

static MONITOR: ModeProfile = ModeProfile {
    exchange: Exchange {
        request: Message::MonitorRequest,
        reply: Message::MonitorAck,
        escalation: Some(Escalation {
            trigger: Message::PanicAck,
            to: Mode::Panic,
        }),
    },
    on_confirmed: OnConfirmed::Hold,
    leds: LedLevels::FIRST_ONLY,
};

static PANIC: ModeProfile = ModeProfile {
    exchange: Exchange {
        request: Message::PanicRequest,
        reply: Message::PanicAck,
        escalation: None,
    },
    on_confirmed: OnConfirmed::Hold,
    leds: LedLevels::SECOND_ONLY,
};

static OFF: ModeProfile = ModeProfile {
    exchange: Exchange {
        request: Message::OffRequest,
        reply: Message::OffAck,
        escalation: None,
    },
    on_confirmed: OnConfirmed::Finalize(Message::OffFinalize),
    leds: LedLevels::DARK,
};

impl Mode {
    pub fn profile(self) -> &'static ModeProfile {
        match self {
            Mode::Monitor => &MONITOR,
            Mode::Panic => &PANIC,
            Mode::Off => &OFF,
        }
    }
}

impl ModeProfile {
    /// Steady LED pattern for this iteration
    ///
    /// Both LEDs are lit for `grace_ms` after the finalize message went out.
    pub fn normal_leds(&self, session: &HandshakeSession, now: u64, grace_ms: u64) -> LedLevels {
        match session.finalized_at() {
            Some(at) if now.saturating_sub(at) < grace_ms => LedLevels::BOTH,
            _ => self.leds,
        }
    }
}
