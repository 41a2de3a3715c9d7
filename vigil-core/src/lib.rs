//! Board-agnostic core logic for the alarm panel
//!
//! This crate contains all panel behavior that does not depend on a
//! specific board:
//!
//! - Mode state machine (MONITOR / PANIC / OFF)
//! - Button edge sampling
//! - Request/acknowledge handshake with the alarm unit
//! - LED indicator (steady pattern or failure blink)
//! - The controller that runs one loop iteration over all of the above
//! - Configuration types and the `panel.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod error;
pub mod handshake;
pub mod input;
pub mod led;
pub mod state;

pub use controller::{Controller, ControllerState, Iteration, PanelIo};
pub use error::Error;
pub use state::Mode;
