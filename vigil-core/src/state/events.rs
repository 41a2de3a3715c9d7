//! Events that trigger mode transitions

use super::machine::Mode;

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A button edge requested this mode
    ButtonPressed(Mode),
    /// The alarm unit answered with another mode's acknowledgement
    PeerEscalation(Mode),
}
