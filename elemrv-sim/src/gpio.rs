//! Simulated GPIO port
//!
//! Inputs idle high (pulled up); a button press is a falling edge followed
//! by a rising edge on release. Edges latch only on armed `(pin, edge)`
//! pairs, and disarming acknowledges the latch.

use std::cell::Cell;
use std::rc::Rc;

use elemrv_hal::{Edge, GpioPort, Pin, PinMask};

use crate::trace::{Event, Trace};

struct PortState {
    trace: Trace,
    outputs: Cell<u32>,
    levels: Cell<u32>,
    inputs: Cell<u32>,
    armed_rising: Cell<u32>,
    armed_falling: Cell<u32>,
    latched_rising: Cell<u32>,
    latched_falling: Cell<u32>,
}

impl PortState {
    fn armed(&self, edge: Edge) -> &Cell<u32> {
        match edge {
            Edge::Rising => &self.armed_rising,
            Edge::Falling => &self.armed_falling,
        }
    }

    fn latched(&self, edge: Edge) -> &Cell<u32> {
        match edge {
            Edge::Rising => &self.latched_rising,
            Edge::Falling => &self.latched_falling,
        }
    }

    fn drive(&self, pin: Pin, high: bool) {
        let was_high = self.inputs.get() & pin.mask() != 0;
        if was_high == high {
            return;
        }

        if high {
            self.inputs.set(self.inputs.get() | pin.mask());
        } else {
            self.inputs.set(self.inputs.get() & !pin.mask());
        }

        let edge = if high { Edge::Rising } else { Edge::Falling };
        if self.armed(edge).get() & pin.mask() != 0 {
            let latch = self.latched(edge);
            latch.set(latch.get() | pin.mask());
            self.trace.record(Event::GpioEdgeLatched(pin.number(), edge));
        }
    }
}

/// Simulated GPIO port
pub struct SimGpio {
    state: Rc<PortState>,
}

/// External driver of one input pin
#[derive(Clone)]
pub struct Button {
    state: Rc<PortState>,
    pin: Pin,
}

impl Button {
    /// Press and release: one falling edge, one rising edge
    pub fn press(&self) {
        self.state.drive(self.pin, false);
        self.state.drive(self.pin, true);
    }

    /// Hold the input low
    pub fn hold(&self) {
        self.state.drive(self.pin, false);
    }

    /// Let the input return high
    pub fn release(&self) {
        self.state.drive(self.pin, true);
    }
}

impl SimGpio {
    /// Create a port in reset state
    pub fn new(trace: Trace) -> Self {
        Self {
            state: Rc::new(PortState {
                trace,
                outputs: Cell::new(0),
                levels: Cell::new(0),
                inputs: Cell::new(u32::MAX),
                armed_rising: Cell::new(0),
                armed_falling: Cell::new(0),
                latched_rising: Cell::new(0),
                latched_falling: Cell::new(0),
            }),
        }
    }

    /// Get a handle that drives `pin` from outside
    pub fn button(&self, pin: Pin) -> Button {
        Button {
            state: self.state.clone(),
            pin,
        }
    }

    /// Press and release `pin` once
    pub fn press(&self, pin: Pin) {
        self.button(pin).press();
    }

    /// Pins configured as outputs
    pub fn outputs(&self) -> PinMask {
        PinMask(self.state.outputs.get())
    }

    /// Driven level of an output pin
    pub fn is_set_high(&self, pin: Pin) -> bool {
        self.state.levels.get() & pin.mask() != 0
    }

    /// Check if `(pin, edge)` is armed
    pub fn is_armed(&self, pin: Pin, edge: Edge) -> bool {
        self.state.armed(edge).get() & pin.mask() != 0
    }

    /// Check if any armed edge is latched and so asserts the port's line
    pub fn irq_asserted(&self) -> bool {
        (self.state.latched_rising.get() | self.state.latched_falling.get()) != 0
    }
}

impl GpioPort for SimGpio {
    fn init(&self) {
        let s = &self.state;
        s.outputs.set(0);
        s.levels.set(0);
        s.armed_rising.set(0);
        s.armed_falling.set(0);
        s.latched_rising.set(0);
        s.latched_falling.set(0);
        s.trace.record(Event::GpioInit);
    }

    fn dir_set(&self, outputs: PinMask) {
        self.state.outputs.set(outputs.0);
        self.state.trace.record(Event::GpioDir(outputs.0));
    }

    fn value_set(&self, pin: Pin) {
        self.state.levels.set(self.state.levels.get() | pin.mask());
        self.state.trace.record(Event::GpioSet(pin.number()));
    }

    fn value_clr(&self, pin: Pin) {
        self.state.levels.set(self.state.levels.get() & !pin.mask());
        self.state.trace.record(Event::GpioClr(pin.number()));
    }

    fn irq_ready(&self, pin: Pin, edge: Edge) -> bool {
        self.state.latched(edge).get() & pin.mask() != 0
    }

    fn irq_enable(&self, pin: Pin, edge: Edge) {
        let armed = self.state.armed(edge);
        armed.set(armed.get() | pin.mask());
        self.state.trace.record(Event::GpioIrqArmed(pin.number(), edge));
    }

    fn irq_disable(&self, pin: Pin, edge: Edge) {
        let armed = self.state.armed(edge);
        armed.set(armed.get() & !pin.mask());
        let latch = self.state.latched(edge);
        latch.set(latch.get() & !pin.mask());
        self.state.trace.record(Event::GpioIrqDisarmed(pin.number(), edge));
    }
}
