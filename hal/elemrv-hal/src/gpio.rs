//! GPIO port abstraction
//!
//! A single 32-bit port with per-pin direction, output level and
//! per-(pin, edge) interrupt arming.

use crate::error::HalError;

/// Number of pins on the port
pub const GPIO_WIDTH: u8 = 32;

/// GPIO pin number, always below [`GPIO_WIDTH`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(u8);

impl Pin {
    /// Create a pin, rejecting numbers outside the port
    pub const fn new(pin: u8) -> Result<Self, HalError> {
        if pin < GPIO_WIDTH {
            Ok(Self(pin))
        } else {
            Err(HalError::InvalidPin(pin))
        }
    }

    /// Raw pin number
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Bit of this pin in a port-wide register
    pub const fn mask(self) -> u32 {
        1 << self.0
    }
}

/// Port-wide pin set, one bit per pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMask(pub u32);

impl PinMask {
    /// No pins
    pub const EMPTY: Self = Self(0);

    /// Add a pin to the set
    pub const fn with(self, pin: Pin) -> Self {
        Self(self.0 | pin.mask())
    }

    /// Check if a pin is in the set
    pub const fn contains(self, pin: Pin) -> bool {
        self.0 & pin.mask() != 0
    }
}

impl From<Pin> for PinMask {
    fn from(pin: Pin) -> Self {
        Self(pin.mask())
    }
}

/// Input transition that raises a pin interrupt
///
/// The kind is chosen when the interrupt is armed and never reconfigured
/// while armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

/// GPIO port
pub trait GpioPort {
    /// Reset the port: all inputs, outputs low, interrupts disarmed
    fn init(&self);

    /// Configure directions; set bits become outputs, clear bits inputs
    fn dir_set(&self, outputs: PinMask);

    /// Drive an output pin high
    fn value_set(&self, pin: Pin);

    /// Drive an output pin low
    fn value_clr(&self, pin: Pin);

    /// Check the latched interrupt flag for `(pin, edge)`
    fn irq_ready(&self, pin: Pin, edge: Edge) -> bool;

    /// Arm `(pin, edge)` so a matching transition latches and is
    /// propagated to the controller
    ///
    /// Idempotent: arming an armed pin does not duplicate deliveries.
    fn irq_enable(&self, pin: Pin, edge: Edge);

    /// Disarm `(pin, edge)` and acknowledge its latched flag
    ///
    /// Transitions while disarmed are not latched.
    fn irq_disable(&self, pin: Pin, edge: Edge);
}

impl<T: GpioPort + ?Sized> GpioPort for &T {
    fn init(&self) {
        T::init(self)
    }

    fn dir_set(&self, outputs: PinMask) {
        T::dir_set(self, outputs)
    }

    fn value_set(&self, pin: Pin) {
        T::value_set(self, pin)
    }

    fn value_clr(&self, pin: Pin) {
        T::value_clr(self, pin)
    }

    fn irq_ready(&self, pin: Pin, edge: Edge) -> bool {
        T::irq_ready(self, pin, edge)
    }

    fn irq_enable(&self, pin: Pin, edge: Edge) {
        T::irq_enable(self, pin, edge)
    }

    fn irq_disable(&self, pin: Pin, edge: Edge) {
        T::irq_disable(self, pin, edge)
    }
}
