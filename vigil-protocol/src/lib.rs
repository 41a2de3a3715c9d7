//! Panel ↔ Alarm Unit Serial Protocol
//!
//! The panel and the alarm unit talk over a 9600 8N1 UART using single-byte
//! messages. There is no framing, length or checksum: every byte on the wire
//! is a complete message.
//!
//! # Message alphabet
//!
//! ```text
//!   panel → unit          unit → panel
//!   ────────────          ────────────
//!   'm' monitor request   'M' monitor acknowledged
//!   'p' panic request     'P' panic acknowledged
//!   'o' off request       'O' off acknowledged
//!   'x' off finalize      (no reply)
//! ```
//!
//! The panel sends one request and waits for its acknowledgement before it
//! sends another, so replies are matched purely by order.

#![no_std]
#![deny(unsafe_code)]

pub mod messages;

pub use messages::{Direction, Message};
