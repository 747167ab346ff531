//! Core error type
//!
//! Every variant is a configuration or wiring problem detected before the
//! main loop starts. Nothing on the trap path returns an error.

use core::fmt;

use elemrv_hal::HalError;

/// Errors reported by configuration validation, table registration and boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Identifier rejected by the HAL
    Hal(HalError),
    /// Source id beyond the platform controller's source count
    InvalidSource(u8),
    /// Two handlers registered for one source id
    DuplicateSource(u8),
    /// Source table has no free entry
    TableFull,
    /// An enabled source has no registered handler
    UnhandledSource(u8),
    /// Pin owned by both the foreground loop and the trap handler
    PinConflict(u8),
    /// Two peripherals mapped at one base address
    AddressConflict(usize),
    /// Baud-rate parameters give a zero or undefined divisor
    InvalidDivisor,
    /// Duration does not fit the 32-bit timer wait
    TickOverflow,
    /// Blink pattern has no steps
    EmptyPattern,
    /// Blink pattern exceeds the fixed step capacity
    PatternTooLong,
}

impl From<HalError> for Error {
    fn from(e: HalError) -> Self {
        Error::Hal(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hal(e) => write!(f, "{}", e),
            Self::InvalidSource(id) => write!(f, "source {} not provided by controller", id),
            Self::DuplicateSource(id) => write!(f, "source {} already has a handler", id),
            Self::TableFull => write!(f, "source table full"),
            Self::UnhandledSource(id) => write!(f, "source {} has no handler", id),
            Self::PinConflict(pin) => write!(f, "pin {} used by both contexts", pin),
            Self::AddressConflict(base) => write!(f, "base address {:#x} mapped twice", base),
            Self::InvalidDivisor => write!(f, "invalid baud divisor"),
            Self::TickOverflow => write!(f, "duration overflows timer"),
            Self::EmptyPattern => write!(f, "blink pattern is empty"),
            Self::PatternTooLong => write!(f, "blink pattern too long"),
        }
    }
}
