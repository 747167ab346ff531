//! Simulated hart mask state

use std::cell::Cell;
use std::rc::Rc;

use elemrv_hal::Hart;

use crate::trace::{Event, Trace};

/// Simulated machine-mode hart
///
/// Comes out of reset masked with no trap vector, like the real core.
pub struct SimHart {
    trace: Trace,
    masked: Rc<Cell<bool>>,
    vector_installed: Cell<bool>,
}

/// Read-only view of the hart mask, usable from device hooks
#[derive(Clone)]
pub struct MaskProbe {
    masked: Rc<Cell<bool>>,
}

impl MaskProbe {
    /// Check if interrupts are masked right now
    pub fn is_masked(&self) -> bool {
        self.masked.get()
    }
}

impl SimHart {
    /// Create a hart in reset state
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            masked: Rc::new(Cell::new(true)),
            vector_installed: Cell::new(false),
        }
    }

    /// Get a probe of the mask state
    pub fn probe(&self) -> MaskProbe {
        MaskProbe {
            masked: self.masked.clone(),
        }
    }

    /// Check if a trap vector has been installed
    pub fn vector_installed(&self) -> bool {
        self.vector_installed.get()
    }

    /// Take a trap: hardware masks before entering the handler
    pub(crate) fn enter_trap(&self, sources: u32) {
        self.masked.set(true);
        self.trace.record(Event::TrapTaken(sources));
    }

    /// Return from a trap taken while unmasked
    pub(crate) fn return_from_trap(&self) {
        self.masked.set(false);
        self.trace.record(Event::TrapReturned);
    }
}

impl Hart for SimHart {
    fn install_trap_vector(&self) {
        self.vector_installed.set(true);
        self.trace.record(Event::TrapVectorInstalled);
    }

    fn mask(&self) {
        self.masked.set(true);
        self.trace.record(Event::Masked);
    }

    fn unmask(&self) {
        self.masked.set(false);
        self.trace.record(Event::Unmasked);
    }

    fn is_masked(&self) -> bool {
        self.masked.get()
    }
}
