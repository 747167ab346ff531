//! Simulated machine timer
//!
//! Waiting advances a virtual counter instantly, so a full blink period
//! runs in microseconds of host time.

use std::cell::Cell;

use elemrv_hal::TimerDevice;

use crate::trace::{Event, Trace};

/// Simulated free-running counter
pub struct SimTimer {
    trace: Trace,
    now: Cell<u64>,
}

impl SimTimer {
    /// Create a timer at count zero
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            now: Cell::new(0),
        }
    }

    /// Current counter value
    pub fn now(&self) -> u64 {
        self.now.get()
    }
}

impl TimerDevice for SimTimer {
    fn init(&self) {
        self.now.set(0);
        self.trace.record(Event::TimerInit);
    }

    fn sleep_for(&self, ticks: u32) {
        self.now.set(self.now.get() + u64::from(ticks));
        self.trace.record(Event::Slept(ticks));
    }
}
