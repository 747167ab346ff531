//! Configuration types
//!
//! Board description presets, validation and clock arithmetic.

pub mod platform;
pub mod timing;

pub use platform::*;
pub use timing::{ms_to_ticks, uart_divisor};
