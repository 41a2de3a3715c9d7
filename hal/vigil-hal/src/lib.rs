//! Vigil Hardware Abstraction Layer
//!
//! The panel logic only ever needs four things from the board: read a button
//! line, drive an LED line, move single bytes over a serial port without
//! blocking, and read a monotonic millisecond clock. This crate defines those
//! seams as traits so the same controller runs on the RP2040 and on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  vigil-firmware                         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vigil-core (mode machine, handshake)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vigil-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ vigil-hal-    │       │ mock (host    │
//! │    rp2040     │       │    tests)     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::OutputPin`] - Digital I/O
//! - [`uart::UartTx`], [`uart::UartRx`] - Non-blocking byte serial
//! - [`clock::Monotonic`] - Elapsed time since boot

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod uart;

#[cfg(feature = "mock")]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use clock::Monotonic;
pub use gpio::{InputPin, OutputPin};
pub use uart::{Uart, UartConfig, UartRx, UartTx};
