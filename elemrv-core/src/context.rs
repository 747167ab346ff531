//! Shared peripheral context
//!
//! The peripherals reachable from both the foreground loop and the trap
//! handler. Masking serializes access; the timer is deliberately absent so
//! nothing on the trap path can busy-wait on it.

use elemrv_hal::{GpioPort, InterruptController, UartChannel};

use crate::console::Console;

/// Peripherals shared by the foreground loop and the dispatcher
pub struct Context<U, G, C> {
    pub uart: U,
    pub gpio: G,
    pub controller: C,
}

impl<U, G, C> Context<U, G, C>
where
    U: UartChannel,
    G: GpioPort,
    C: InterruptController,
{
    pub const fn new(uart: U, gpio: G, controller: C) -> Self {
        Self {
            uart,
            gpio,
            controller,
        }
    }
}

impl<U: UartChannel, G, C> Context<U, G, C> {
    /// Text writer over the shared UART
    pub fn console(&self) -> Console<'_, U> {
        Console::new(&self.uart)
    }
}
