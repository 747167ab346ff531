//! Foreground task
//!
//! Boot sequence and the endless LED pattern loop.

pub mod led;
pub mod main_loop;
pub mod pattern;

pub use led::BlinkLed;
pub use main_loop::MainLoop;
pub use pattern::{BlinkStep, Level, Pattern, TimedStep, HEARTBEAT, MAX_PATTERN_STEPS};
