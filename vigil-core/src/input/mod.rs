//! Button input
//!
//! Three push buttons, one per mode. Each press produces exactly one
//! mode request; holding a button down does not repeat it.

pub mod sampler;

pub use sampler::{ButtonChannel, InputSampler};
