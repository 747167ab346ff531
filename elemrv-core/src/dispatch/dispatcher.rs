//! Shared trap entry
//!
//! Every external interrupt lands in [`Dispatcher::on_trap`]. The body runs
//! fully masked; each pending source is disarmed, drained, re-armed and
//! then claimed exactly once.

use heapless::Vec;

use elemrv_hal::{Hart, InterruptController, SourceId};

use super::table::{SourceTable, MAX_TABLE_ENTRIES};
use crate::context::Context;

/// What one trap serviced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrapReport {
    /// Sources claimed, in service order
    pub serviced: Vec<SourceId, MAX_TABLE_ENTRIES>,
    /// Sum of the handlers' work units (bytes echoed, lines written)
    pub handled: usize,
}

impl TrapReport {
    /// Check if no source was pending
    pub fn is_spurious(&self) -> bool {
        self.serviced.is_empty()
    }
}

/// Interrupt dispatcher over a source table
pub struct Dispatcher<'a, U, G, C> {
    table: SourceTable<'a, U, G, C>,
}

impl<'a, U, G, C> Dispatcher<'a, U, G, C>
where
    C: InterruptController,
{
    pub const fn new(table: SourceTable<'a, U, G, C>) -> Self {
        Self { table }
    }

    /// Check if a source has a handler
    pub fn handles(&self, source: SourceId) -> bool {
        self.table.handles(source)
    }

    /// Trap body
    ///
    /// Masks, services every ready source in ascending id order, unmasks.
    /// A source is claimed only after its handler has drained the
    /// condition and re-armed the peripheral.
    pub fn on_trap<H: Hart + ?Sized>(&self, hart: &H, ctx: &Context<U, G, C>) -> TrapReport {
        hart.mask();

        let mut report = TrapReport::default();
        for entry in self.table.entries() {
            if !entry.handler.ready(ctx) {
                continue;
            }

            entry.handler.disable(ctx);
            report.handled += entry.handler.service(ctx);
            entry.handler.enable(ctx);
            ctx.controller.claim(entry.source);

            // One entry per table slot, cannot overflow
            let _ = report.serviced.push(entry.source);
        }

        if report.is_spurious() {
            warn!("spurious trap");
        } else {
            trace!(
                "trap serviced {} sources, {} units",
                report.serviced.len(),
                report.handled
            );
        }

        // Last action of the body: nothing may run unmasked before return
        hart.unmask();
        report
    }
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;

    use elemrv_hal::{Edge, GpioPort, Pin, UartChannel};
    use elemrv_sim::{Event, SimController, SimGpio, SimSoc, SimUart};

    use super::*;
    use crate::dispatch::{GpioEdge, IrqHandler, UartEcho};

    type SimTable<'a, 's> = SourceTable<'a, &'s SimUart, &'s SimGpio, &'s SimController>;

    fn source(id: u8) -> SourceId {
        SourceId::new(id).unwrap()
    }

    fn soc() -> SimSoc {
        SimSoc::new(source(0), source(1))
    }

    /// Records the order of handler calls
    struct Probe<'l> {
        name: &'static str,
        ready: bool,
        log: &'l RefCell<std::vec::Vec<std::string::String>>,
    }

    impl<U, G, C> IrqHandler<U, G, C> for Probe<'_> {
        fn ready(&self, _ctx: &Context<U, G, C>) -> bool {
            self.ready
        }

        fn disable(&self, _ctx: &Context<U, G, C>) {
            self.log.borrow_mut().push(format!("{}:disable", self.name));
        }

        fn service(&self, _ctx: &Context<U, G, C>) -> usize {
            self.log.borrow_mut().push(format!("{}:service", self.name));
            2
        }

        fn enable(&self, _ctx: &Context<U, G, C>) {
            self.log.borrow_mut().push(format!("{}:enable", self.name));
        }
    }

    #[test]
    fn test_handler_call_order() {
        let soc = soc();
        let ctx = Context::new(&soc.uart, &soc.gpio, &soc.controller);
        let log = RefCell::new(std::vec::Vec::new());
        let a = Probe { name: "a", ready: true, log: &log };
        let b = Probe { name: "b", ready: false, log: &log };
        let c = Probe { name: "c", ready: true, log: &log };

        let mut table = SimTable::new(8);
        table.register(source(4), &c).unwrap();
        table.register(source(2), &a).unwrap();
        table.register(source(3), &b).unwrap();
        let dispatcher = Dispatcher::new(table);

        let report = dispatcher.on_trap(&soc.hart, &ctx);

        assert_eq!(
            *log.borrow(),
            [
                "a:disable", "a:service", "a:enable", "c:disable", "c:service", "c:enable"
            ]
        );
        assert_eq!(report.serviced.as_slice(), &[source(2), source(4)]);
        assert_eq!(report.handled, 4);
        assert_eq!(soc.controller.claims(), [2, 4]);
    }

    #[test]
    fn test_mask_brackets_body() {
        let soc = soc();
        let ctx = Context::new(&soc.uart, &soc.gpio, &soc.controller);
        let echo = UartEcho;
        let mut table = SimTable::new(2);
        table.register(source(0), &echo).unwrap();
        let dispatcher = Dispatcher::new(table);

        soc.uart.rx_irq_enable();
        soc.uart.wire().send(b"x");
        soc.trace.clear();

        dispatcher.on_trap(&soc.hart, &ctx);

        let events = soc.trace.events();
        assert_eq!(events.first(), Some(&Event::Masked));
        assert_eq!(events.last(), Some(&Event::Unmasked));
    }

    #[test]
    fn test_drain_then_claim() {
        let soc = soc();
        let ctx = Context::new(&soc.uart, &soc.gpio, &soc.controller);
        let echo = UartEcho;
        let mut table = SimTable::new(2);
        table.register(source(0), &echo).unwrap();
        let dispatcher = Dispatcher::new(table);

        soc.uart.rx_irq_enable();
        soc.uart.wire().send(b"ab");
        soc.trace.clear();

        let report = dispatcher.on_trap(&soc.hart, &ctx);
        assert_eq!(report.handled, 2);

        let trace = &soc.trace;
        let disabled = trace.position(Event::RxIrqDisabled).unwrap();
        let last_read = trace.position(Event::RxRead(b'b')).unwrap();
        let enabled = trace.position(Event::RxIrqEnabled).unwrap();
        let claimed = trace.position(Event::Claimed(0)).unwrap();
        assert!(disabled < last_read);
        assert!(last_read < enabled);
        assert!(enabled < claimed);
        assert_eq!(trace.transmitted(), b"ab");
    }

    #[test]
    fn test_gpio_edge_line() {
        let soc = soc();
        let ctx = Context::new(&soc.uart, &soc.gpio, &soc.controller);
        let pin = Pin::new(3).unwrap();
        let edge = GpioEdge::new(pin, Edge::Falling);
        let mut table = SimTable::new(2);
        table.register(source(1), &edge).unwrap();
        let dispatcher = Dispatcher::new(table);

        soc.gpio.irq_enable(pin, Edge::Falling);
        soc.gpio.press(pin);

        let report = dispatcher.on_trap(&soc.hart, &ctx);
        assert_eq!(report.serviced.as_slice(), &[source(1)]);
        assert_eq!(soc.trace.transmitted(), b"IRQ GPIO: 3\r\n");
        assert!(soc.gpio.is_armed(pin, Edge::Falling));
        assert!(!soc.gpio.irq_ready(pin, Edge::Falling));
    }

    #[test]
    fn test_spurious_trap_claims_nothing() {
        let soc = soc();
        let ctx = Context::new(&soc.uart, &soc.gpio, &soc.controller);
        let echo = UartEcho;
        let mut table = SimTable::new(2);
        table.register(source(0), &echo).unwrap();
        let dispatcher = Dispatcher::new(table);

        let report = dispatcher.on_trap(&soc.hart, &ctx);
        assert!(report.is_spurious());
        assert!(soc.controller.claims().is_empty());
    }

    #[test]
    fn test_unmask_ends_every_trap() {
        let soc = soc();
        let ctx = Context::new(&soc.uart, &soc.gpio, &soc.controller);
        let pin = Pin::new(3).unwrap();
        let echo = UartEcho;
        let edge = GpioEdge::new(pin, Edge::Falling);
        let mut table = SimTable::new(2);
        table.register(source(0), &echo).unwrap();
        table.register(source(1), &edge).unwrap();
        let dispatcher = Dispatcher::new(table);

        soc.controller.enable_source(source(0));
        soc.controller.enable_source(source(1));
        soc.uart.rx_irq_enable();
        soc.gpio.irq_enable(pin, Edge::Falling);
        soc.hart.unmask();
        soc.trace.clear();

        soc.uart.wire().send(b"z");
        soc.gpio.press(pin);
        assert_eq!(
            soc.deliver_traps(|| {
                dispatcher.on_trap(&soc.hart, &ctx);
            }),
            1
        );

        // Spurious entry takes the same exit path
        dispatcher.on_trap(&soc.hart, &ctx);

        let events = soc.trace.events();
        let returned = events
            .iter()
            .position(|e| *e == Event::TrapReturned)
            .unwrap();
        assert_eq!(events[returned - 1], Event::Unmasked);
        assert_eq!(events.last(), Some(&Event::Unmasked));
        assert_eq!(soc.trace.count(Event::Unmasked), 2);

        // Nothing between the claims and the unmask of the serviced trap
        let last_claim = events
            .iter()
            .rposition(|e| matches!(e, Event::Claimed(_)))
            .unwrap();
        assert_eq!(last_claim + 1, returned - 1);
    }
}
