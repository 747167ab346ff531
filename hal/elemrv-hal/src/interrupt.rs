//! Platform interrupt controller abstraction
//!
//! The controller aggregates peripheral interrupt lines into the single
//! machine external interrupt and gates each source until it is claimed.

use crate::error::HalError;

/// Number of source lines the controller register layout can address
pub const MAX_SOURCES: u8 = 32;

/// Interrupt source identifier
///
/// Source numbering is platform-assigned (UART = 0 and GPIO = 1 on the
/// reference SoC), so the value is configuration, but it is always below
/// [`MAX_SOURCES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SourceId(u8);

impl SourceId {
    /// Create a source id, rejecting values the controller cannot address
    pub const fn new(id: u8) -> Result<Self, HalError> {
        if id < MAX_SOURCES {
            Ok(Self(id))
        } else {
            Err(HalError::InvalidSource(id))
        }
    }

    /// Raw source number
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Bit of this source in a 32-bit enable/pending word
    pub const fn mask(self) -> u32 {
        1 << self.0
    }
}

/// Interrupt controller with claim/complete protocol
///
/// Implementations are constructed with their base address; [`init`]
/// must run before any other method.
///
/// [`init`]: InterruptController::init
pub trait InterruptController {
    /// Reset the controller: all sources disabled, nothing pending
    fn init(&self);

    /// Mark a source deliverable
    ///
    /// Idempotent: enabling an enabled source changes nothing and never
    /// causes a second delivery of the same event.
    fn enable_source(&self, source: SourceId);

    /// Stop delivering a source (idempotent)
    fn disable_source(&self, source: SourceId);

    /// Acknowledge that the current occurrence of `source` was handled
    ///
    /// Must only be called once the peripheral-level condition has been
    /// drained; the controller may deliver the next occurrence immediately.
    fn claim(&self, source: SourceId);
}

impl<T: InterruptController + ?Sized> InterruptController for &T {
    fn init(&self) {
        T::init(self)
    }

    fn enable_source(&self, source: SourceId) {
        T::enable_source(self, source)
    }

    fn disable_source(&self, source: SourceId) {
        T::disable_source(self, source)
    }

    fn claim(&self, source: SourceId) {
        T::claim(self, source)
    }
}

/// Stand-in for platforms that ship without an interrupt controller
///
/// Every operation is a no-op; such platforms run the foreground loop
/// only and never install a trap vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullController;

impl InterruptController for NullController {
    fn init(&self) {}

    fn enable_source(&self, _source: SourceId) {}

    fn disable_source(&self, _source: SourceId) {}

    fn claim(&self, _source: SourceId) {}
}
