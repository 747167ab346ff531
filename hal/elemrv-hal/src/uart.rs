//! UART channel abstraction
//!
//! Byte-oriented serial port with a receive-ready interrupt. Receive is
//! non-blocking; transmit busy-waits on the hardware.

/// Receive FIFO is empty
///
/// This is the normal end of a drain loop, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WouldBlock;

/// UART channel
pub trait UartChannel {
    /// Program the baud-rate generator
    ///
    /// The divisor is computed by the caller from the peripheral clock,
    /// baud rate and frame size.
    fn init(&self, divisor: u32);

    /// Check if received data is available
    fn rx_ready(&self) -> bool;

    /// Let the receive-ready condition reach the interrupt controller
    fn rx_irq_enable(&self);

    /// Stop the receive-ready condition from reaching the controller
    fn rx_irq_disable(&self);

    /// Take one byte from the receive FIFO without waiting
    fn getc(&self) -> Result<u8, WouldBlock>;

    /// Transmit one byte
    ///
    /// Spins until the transmitter accepts the byte. A transmitter that
    /// never drains stalls the caller forever.
    fn putc(&self, byte: u8);

    /// Transmit a byte string in order
    fn puts(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.putc(byte);
        }
    }
}

impl<T: UartChannel + ?Sized> UartChannel for &T {
    fn init(&self, divisor: u32) {
        T::init(self, divisor)
    }

    fn rx_ready(&self) -> bool {
        T::rx_ready(self)
    }

    fn rx_irq_enable(&self) {
        T::rx_irq_enable(self)
    }

    fn rx_irq_disable(&self) {
        T::rx_irq_disable(self)
    }

    fn getc(&self) -> Result<u8, WouldBlock> {
        T::getc(self)
    }

    fn putc(&self, byte: u8) {
        T::putc(self, byte)
    }

    fn puts(&self, bytes: &[u8]) {
        T::puts(self, bytes)
    }
}
