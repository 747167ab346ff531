//! Source handlers
//!
//! [`UartEcho`] drains the receive FIFO back out of the transmitter.
//! [`GpioEdge`] reports an edge on one input pin over the console.

use elemrv_hal::{Edge, GpioPort, InterruptController, Pin, UartChannel};

use super::dispatcher::Dispatcher;
use super::table::{IrqHandler, SourceTable};
use crate::config::InterruptPlan;
use crate::context::Context;
use crate::error::Error;

/// Echo every received byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UartEcho;

impl<U: UartChannel, G, C> IrqHandler<U, G, C> for UartEcho {
    fn ready(&self, ctx: &Context<U, G, C>) -> bool {
        ctx.uart.rx_ready()
    }

    fn disable(&self, ctx: &Context<U, G, C>) {
        ctx.uart.rx_irq_disable();
    }

    /// Drain until the FIFO reports empty; returns bytes echoed
    fn service(&self, ctx: &Context<U, G, C>) -> usize {
        let mut echoed = 0;
        while let Ok(byte) = ctx.uart.getc() {
            ctx.uart.putc(byte);
            echoed += 1;
        }
        echoed
    }

    fn enable(&self, ctx: &Context<U, G, C>) {
        ctx.uart.rx_irq_enable();
    }
}

/// Report edges on one pin as `IRQ GPIO: <pin>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioEdge {
    pin: Pin,
    edge: Edge,
}

impl GpioEdge {
    pub const fn new(pin: Pin, edge: Edge) -> Self {
        Self { pin, edge }
    }
}

impl<U: UartChannel, G: GpioPort, C> IrqHandler<U, G, C> for GpioEdge {
    fn ready(&self, ctx: &Context<U, G, C>) -> bool {
        ctx.gpio.irq_ready(self.pin, self.edge)
    }

    fn disable(&self, ctx: &Context<U, G, C>) {
        ctx.gpio.irq_disable(self.pin, self.edge);
    }

    fn service(&self, ctx: &Context<U, G, C>) -> usize {
        ctx.console()
            .line(format_args!("IRQ GPIO: {}", self.pin.number()));
        1
    }

    fn enable(&self, ctx: &Context<U, G, C>) {
        ctx.gpio.irq_enable(self.pin, self.edge);
    }
}

/// The handler set of the interrupt-driven variant
///
/// Owns the handlers so the table built from it can borrow them for as long
/// as the dispatcher lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardHandlers {
    plan: InterruptPlan,
    echo: UartEcho,
    edge: GpioEdge,
}

impl StandardHandlers {
    pub const fn new(plan: InterruptPlan) -> Self {
        Self {
            plan,
            echo: UartEcho,
            edge: GpioEdge::new(plan.edge_pin, plan.edge),
        }
    }

    /// Build a dispatcher with UART echo and GPIO edge registered
    pub fn dispatcher<U, G, C>(&self) -> Result<Dispatcher<'_, U, G, C>, Error>
    where
        U: UartChannel,
        G: GpioPort,
        C: InterruptController,
    {
        let mut table: SourceTable<'_, U, G, C> = SourceTable::new(self.plan.num_sources);
        table.register(self.plan.uart, &self.echo)?;
        table.register(self.plan.gpio, &self.edge)?;
        Ok(Dispatcher::new(table))
    }
}
