//! Hart-level interrupt control
//!
//! Global masking is the only mutual exclusion between the foreground loop
//! and the trap handler.

use crate::error::HalError;

/// Alignment of a direct-mode trap vector
pub const TRAP_VECTOR_ALIGN: usize = 4;

/// Check a trap entry address for direct-mode installation
///
/// The low two bits of `mtvec` select the mode, so an unaligned entry would
/// switch the hart to vectored dispatch.
pub const fn direct_trap_vector(trap_entry: usize) -> Result<usize, HalError> {
    if trap_entry % TRAP_VECTOR_ALIGN != 0 {
        return Err(HalError::MisalignedTrapVector(trap_entry));
    }
    Ok(trap_entry)
}

/// The executing hardware thread
pub trait Hart {
    /// Point the trap vector at the firmware's trap entry and route the
    /// external interrupt line to it
    fn install_trap_vector(&self);

    /// Globally disable interrupt delivery
    fn mask(&self);

    /// Globally enable interrupt delivery
    fn unmask(&self);

    /// Check if delivery is currently disabled
    fn is_masked(&self) -> bool;
}

/// Machine-mode implementation on the RISC-V CSRs
#[cfg(feature = "riscv")]
#[allow(unsafe_code)]
pub mod machine {
    use riscv::register::mtvec::{self, Mtvec, TrapMode};
    use riscv::register::{mie, mstatus};

    use super::{direct_trap_vector, Hart};
    use crate::error::HalError;

    /// Single machine-mode hart
    ///
    /// `trap_entry` is the address of the assembly trap stub, which saves
    /// the caller context and calls into the dispatcher.
    pub struct MachineHart {
        trap_entry: usize,
    }

    impl MachineHart {
        /// Create a hart handle trapping to `trap_entry`
        ///
        /// Rejects an address that is not 4-byte aligned.
        pub const fn new(trap_entry: usize) -> Result<Self, HalError> {
            match direct_trap_vector(trap_entry) {
                Ok(trap_entry) => Ok(Self { trap_entry }),
                Err(e) => Err(e),
            }
        }
    }

    impl Hart for MachineHart {
        fn install_trap_vector(&self) {
            let mut vector = Mtvec::from_bits(0);
            // Alignment is checked in `new`
            if vector.try_set_address(self.trap_entry).is_err() {
                return;
            }
            vector.set_trap_mode(TrapMode::Direct);

            // SAFETY: trap_entry is the firmware's trap stub, installed once
            // during boot with MIE still clear.
            unsafe {
                mtvec::write(vector);
                mie::set_mext();
            }
        }

        fn mask(&self) {
            // SAFETY: clearing MIE only defers interrupt delivery.
            unsafe { mstatus::clear_mie() }
        }

        fn unmask(&self) {
            // SAFETY: called only after the trap vector is installed.
            unsafe { mstatus::set_mie() }
        }

        fn is_masked(&self) -> bool {
            !mstatus::read().mie()
        }
    }
}
