//! Complete simulated SoC and trap delivery

use elemrv_hal::{Hart, SourceId};

use crate::controller::SimController;
use crate::gpio::SimGpio;
use crate::hart::SimHart;
use crate::timer::SimTimer;
use crate::trace::{Event, Trace};
use crate::uart::SimUart;

/// Upper bound on back-to-back traps in one delivery call
///
/// A handler that never clears its condition would otherwise be
/// re-entered forever.
pub const MAX_TRAP_BURST: usize = 64;

/// All simulated peripherals of one SoC, sharing a trace
pub struct SimSoc {
    pub trace: Trace,
    pub hart: SimHart,
    pub uart: SimUart,
    pub gpio: SimGpio,
    pub timer: SimTimer,
    pub controller: SimController,
    uart_source: SourceId,
    gpio_source: SourceId,
}

impl SimSoc {
    /// Create a SoC with the UART and GPIO wired to the given controller
    /// source lines
    pub fn new(uart_source: SourceId, gpio_source: SourceId) -> Self {
        let trace = Trace::new();
        Self {
            hart: SimHart::new(trace.clone()),
            uart: SimUart::new(trace.clone()),
            gpio: SimGpio::new(trace.clone()),
            timer: SimTimer::new(trace.clone()),
            controller: SimController::new(trace.clone()),
            trace,
            uart_source,
            gpio_source,
        }
    }

    /// Controller source lines currently asserted by the peripherals
    pub fn asserted(&self) -> u32 {
        let mut lines = 0;
        if self.uart.irq_asserted() {
            lines |= self.uart_source.mask();
        }
        if self.gpio.irq_asserted() {
            lines |= self.gpio_source.mask();
        }
        lines
    }

    /// Check if the hart would take a trap at this instant
    pub fn trap_pending(&self) -> bool {
        !self.hart.is_masked() && self.controller.deliverable(self.asserted()) != 0
    }

    /// Take every trap that is pending, calling `handler` as the trap body
    ///
    /// Entry masks the hart and puts the delivered sources in service;
    /// return restores the unmasked state the trap interrupted. Returns the
    /// number of traps taken.
    pub fn deliver_traps(&self, mut handler: impl FnMut()) -> usize {
        let mut taken = 0;
        while taken < MAX_TRAP_BURST && self.trap_pending() {
            let sources = self.controller.deliverable(self.asserted());
            self.controller.begin_service(sources);
            self.hart.enter_trap(sources);
            handler();
            self.hart.return_from_trap();
            taken += 1;
        }
        taken
    }

    /// Count of trap entries recorded so far
    pub fn traps_taken(&self) -> usize {
        self.trace
            .events()
            .iter()
            .filter(|e| matches!(e, Event::TrapTaken(_)))
            .count()
    }
}
