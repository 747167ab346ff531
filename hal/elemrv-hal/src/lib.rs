//! ElemRV Hardware Abstraction Layer
//!
//! This crate defines the peripheral contracts the interrupt core is written
//! against. Register-level drivers for a concrete SoC implement these traits;
//! the host test bench (`elemrv-sim`) implements them in software.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  elemrv-core (dispatcher, main loop)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  elemrv-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ board drivers │       │  elemrv-sim   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! Every peripheral method takes `&self`. The devices are memory-mapped
//! register blocks reached from both the foreground loop and the trap
//! handler; exclusion between the two comes from global interrupt masking
//! ([`hart::Hart`]), not from Rust borrows.
//!
//! # Traits
//!
//! - [`interrupt::InterruptController`] - Source enable and claim/complete
//! - [`uart::UartChannel`] - Byte I/O with receive interrupt control
//! - [`gpio::GpioPort`] - Digital I/O with per-(pin, edge) interrupts
//! - [`timer::TimerDevice`] - Free-running counter with blocking wait
//! - [`hart::Hart`] - Global masking and trap vector installation

#![no_std]
#![deny(unsafe_code)]

pub mod error;
pub mod gpio;
pub mod hart;
pub mod interrupt;
pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use error::HalError;
pub use gpio::{Edge, GpioPort, Pin, PinMask, GPIO_WIDTH};
pub use hart::{direct_trap_vector, Hart, TRAP_VECTOR_ALIGN};
#[cfg(feature = "riscv")]
pub use hart::machine::MachineHart;
pub use interrupt::{InterruptController, NullController, SourceId, MAX_SOURCES};
pub use timer::TimerDevice;
pub use uart::{UartChannel, WouldBlock};
