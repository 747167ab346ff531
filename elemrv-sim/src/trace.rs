//! Shared event trace

use std::cell::RefCell;
use std::rc::Rc;

use elemrv_hal::Edge;

/// One observable hardware access or stimulus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Hart
    TrapVectorInstalled,
    Masked,
    Unmasked,
    /// A trap was taken for the given controller sources (bitmask)
    TrapTaken(u32),
    TrapReturned,

    // Interrupt controller
    ControllerInit,
    SourceEnabled(u8),
    SourceDisabled(u8),
    Claimed(u8),

    // UART
    UartInit(u32),
    RxIrqEnabled,
    RxIrqDisabled,
    /// Byte arrived on the wire
    RxArrived(u8),
    /// Byte arrived with the FIFO full and was lost
    RxOverrun(u8),
    /// Byte taken by `getc`
    RxRead(u8),
    Tx(u8),

    // GPIO
    GpioInit,
    GpioDir(u32),
    GpioSet(u8),
    GpioClr(u8),
    GpioIrqArmed(u8, Edge),
    GpioIrqDisarmed(u8, Edge),
    /// Input transition latched by an armed pin
    GpioEdgeLatched(u8, Edge),

    // Timer
    TimerInit,
    Slept(u32),
}

/// Append-only event log shared by all simulated devices
#[derive(Debug, Clone, Default)]
pub struct Trace {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Trace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Drop all recorded events
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Number of events equal to `event`
    pub fn count(&self, event: Event) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    /// Index of the first event equal to `event`
    pub fn position(&self, event: Event) -> Option<usize> {
        self.events.borrow().iter().position(|e| *e == event)
    }

    /// Bytes transmitted on the UART, in order
    pub fn transmitted(&self) -> Vec<u8> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Tx(b) => Some(*b),
                _ => None,
            })
            .collect()
    }
}
