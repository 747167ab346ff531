//! Simulated UART with a bounded receive FIFO

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use elemrv_hal::{UartChannel, WouldBlock};

use crate::trace::{Event, Trace};

/// Receive FIFO depth of the UART block
pub const RX_FIFO_DEPTH: usize = 16;

type TxHook = Box<dyn FnMut(u8)>;

/// Simulated UART
pub struct SimUart {
    trace: Trace,
    rx: Rc<RefCell<VecDeque<u8>>>,
    rx_irq: Cell<bool>,
    divisor: Cell<Option<u32>>,
    tx_hook: RefCell<Option<TxHook>>,
}

/// The far end of the serial line
///
/// Cheap to clone; bytes sent here land in the receive FIFO.
#[derive(Clone)]
pub struct UartWire {
    trace: Trace,
    rx: Rc<RefCell<VecDeque<u8>>>,
}

impl UartWire {
    /// Deliver bytes to the receive FIFO
    ///
    /// Bytes arriving with the FIFO full are dropped as an overrun.
    pub fn send(&self, bytes: &[u8]) {
        let mut rx = self.rx.borrow_mut();
        for &byte in bytes {
            if rx.len() < RX_FIFO_DEPTH {
                rx.push_back(byte);
                self.trace.record(Event::RxArrived(byte));
            } else {
                self.trace.record(Event::RxOverrun(byte));
            }
        }
    }
}

impl SimUart {
    /// Create a UART in reset state
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            rx: Rc::new(RefCell::new(VecDeque::with_capacity(RX_FIFO_DEPTH))),
            rx_irq: Cell::new(false),
            divisor: Cell::new(None),
            tx_hook: RefCell::new(None),
        }
    }

    /// Get a handle to the serial line
    pub fn wire(&self) -> UartWire {
        UartWire {
            trace: self.trace.clone(),
            rx: self.rx.clone(),
        }
    }

    /// Divisor programmed by `init`, if any
    pub fn divisor(&self) -> Option<u32> {
        self.divisor.get()
    }

    /// Check if the receive interrupt is enabled
    pub fn rx_irq_enabled(&self) -> bool {
        self.rx_irq.get()
    }

    /// Bytes waiting in the receive FIFO
    pub fn rx_pending(&self) -> usize {
        self.rx.borrow().len()
    }

    /// Check if the receive condition reaches the controller
    pub fn irq_asserted(&self) -> bool {
        self.rx_irq.get() && !self.rx.borrow().is_empty()
    }

    /// Run `hook` after every transmitted byte
    ///
    /// Lets a test inject stimulus at a precise point inside a trap body.
    pub fn on_transmit(&self, hook: impl FnMut(u8) + 'static) {
        *self.tx_hook.borrow_mut() = Some(Box::new(hook));
    }
}

impl UartChannel for SimUart {
    fn init(&self, divisor: u32) {
        self.divisor.set(Some(divisor));
        self.rx_irq.set(false);
        self.rx.borrow_mut().clear();
        self.trace.record(Event::UartInit(divisor));
    }

    fn rx_ready(&self) -> bool {
        !self.rx.borrow().is_empty()
    }

    fn rx_irq_enable(&self) {
        self.rx_irq.set(true);
        self.trace.record(Event::RxIrqEnabled);
    }

    fn rx_irq_disable(&self) {
        self.rx_irq.set(false);
        self.trace.record(Event::RxIrqDisabled);
    }

    fn getc(&self) -> Result<u8, WouldBlock> {
        let byte = self.rx.borrow_mut().pop_front().ok_or(WouldBlock)?;
        self.trace.record(Event::RxRead(byte));
        Ok(byte)
    }

    fn putc(&self, byte: u8) {
        self.trace.record(Event::Tx(byte));

        // Taken out for the call so the hook may touch this UART again
        let hook = self.tx_hook.borrow_mut().take();
        if let Some(mut hook) = hook {
            hook(byte);
            let mut slot = self.tx_hook.borrow_mut();
            if slot.is_none() {
                *slot = Some(hook);
            }
        }
    }
}
