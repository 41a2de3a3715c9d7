//! Mode state machine
//!
//! The panel is always in exactly one [`Mode`]. Buttons select a mode
//! directly; the alarm unit may escalate MONITOR to PANIC. Everything a mode
//! does on the wire and on the LEDs is described by its [`ModeProfile`].

pub mod events;
pub mod machine;
pub mod profile;

pub use events::Event;
pub use machine::{Mode, ModeMachine, Transition};
pub use profile::{ModeProfile, OnConfirmed};
