//! Request/acknowledge handshake with the alarm unit
//!
//! Each mode activation opens a [`HandshakeSession`]. The panel sends the
//! mode's request byte, then polls for the matching acknowledgement until it
//! arrives or the overtime window passes, in which case the request is sent
//! again. See [`attempt`] for the per-iteration step.

pub mod engine;
pub mod session;

pub use engine::{attempt, Escalation, Exchange, Outcome};
pub use session::HandshakeSession;
