//! Controller error type
//!
//! Only the serial link can fail at runtime. Neither variant is fatal: the
//! handshake session is left as it was, so the next loop iteration retries.

/// Errors surfaced by [`crate::Controller::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The UART refused a byte (request or finalize)
    SerialWrite,
    /// The UART reported a receive fault (framing, overrun, ...)
    SerialRead,
}
