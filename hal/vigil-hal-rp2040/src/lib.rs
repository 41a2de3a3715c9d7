//! RP2040-specific HAL for the alarm panel
//!
//! Thin adapters from embassy-rp drivers to the `vigil-hal` traits:
//!
//! - [`gpio::ButtonInput`] / [`gpio::LedOutput`] over embassy-rp GPIO
//! - [`uart::SerialPort`] over any `embedded-io` UART (the firmware uses
//!   embassy-rp's `BufferedUart`)
//! - [`clock::EmbassyClock`] over the embassy-time driver

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod uart;

pub use clock::EmbassyClock;
pub use gpio::{ButtonInput, LedOutput};
pub use uart::{uart_config, SerialError, SerialPort};
