//! Simulated ElemRV SoC for host testing
//!
//! Software models of every peripheral the interrupt core drives. All
//! devices append to one shared [`Trace`], so tests can assert on the exact
//! interleaving of masking, peripheral accesses and controller claims.
//!
//! Asynchronous stimulus (bytes on the wire, button presses) is injected
//! through [`UartWire`] and [`SimGpio::press`]. A trap is modelled by
//! [`SimSoc::deliver_traps`], which only fires while the hart is unmasked
//! and the controller has an enabled, asserted source that is not already
//! in service.

pub mod controller;
pub mod gpio;
pub mod hart;
pub mod soc;
pub mod timer;
pub mod trace;
pub mod uart;

pub use controller::SimController;
pub use gpio::{Button, SimGpio};
pub use hart::{MaskProbe, SimHart};
pub use soc::{SimSoc, MAX_TRAP_BURST};
pub use timer::SimTimer;
pub use trace::{Event, Trace};
pub use uart::{SimUart, UartWire, RX_FIFO_DEPTH};
