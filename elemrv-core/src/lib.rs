//! Board-agnostic core of the ElemRV firmware
//!
//! Everything above the register level:
//!
//! - Platform configuration presets and validation
//! - Shared peripheral context and UART console
//! - Trap dispatcher with a source table of handlers
//! - Boot sequence and the foreground LED pattern loop
//!
//! A board wires its drivers into a [`Context`], builds a [`Dispatcher`]
//! that the trap vector calls, and hands both to [`MainLoop::run`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod config;
pub mod console;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod foreground;

pub use config::{Platform, PlatformConfig};
pub use console::Console;
pub use context::Context;
pub use dispatch::{Dispatcher, IrqHandler, SourceTable, StandardHandlers, TrapReport};
pub use error::Error;
pub use foreground::MainLoop;
