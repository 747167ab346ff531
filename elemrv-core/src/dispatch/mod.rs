//! Trap dispatch
//!
//! One shared trap entry multiplexes every interrupt source through a
//! table of handlers keyed by controller source id.

pub mod dispatcher;
pub mod handlers;
pub mod table;

pub use dispatcher::{Dispatcher, TrapReport};
pub use handlers::{GpioEdge, StandardHandlers, UartEcho};
pub use table::{IrqHandler, SourceEntry, SourceTable, MAX_TABLE_ENTRIES};
