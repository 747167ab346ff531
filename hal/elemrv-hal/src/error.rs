//! Errors raised at the HAL boundary

use core::fmt;

/// Identifier validation failures
///
/// The register-level drivers trust their arguments, so out-of-range
/// identifiers are rejected when the typed id is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// Interrupt source id outside the controller's range
    InvalidSource(u8),
    /// GPIO pin number outside the port width
    InvalidPin(u8),
    /// Trap entry address would set the `mtvec` mode bits
    MisalignedTrapVector(usize),
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSource(id) => write!(f, "interrupt source {} out of range", id),
            Self::InvalidPin(pin) => write!(f, "gpio pin {} out of range", pin),
            Self::MisalignedTrapVector(addr) => {
                write!(f, "trap vector {:#x} not 4-byte aligned", addr)
            }
        }
    }
}
