//! UART console writer

use core::convert::Infallible;
use core::fmt;

use elemrv_hal::UartChannel;

/// Blocking text output over a [`UartChannel`]
pub struct Console<'a, U> {
    uart: &'a U,
}

impl<'a, U: UartChannel> Console<'a, U> {
    pub const fn new(uart: &'a U) -> Self {
        Self { uart }
    }

    /// Write formatted text followed by CRLF
    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        // write_str cannot fail
        let _ = fmt::Write::write_fmt(self, args);
        self.uart.puts(b"\r\n");
    }
}

impl<U: UartChannel> fmt::Write for Console<'_, U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.uart.puts(s.as_bytes());
        Ok(())
    }
}

impl<U: UartChannel> embedded_io::ErrorType for Console<'_, U> {
    type Error = Infallible;
}

impl<U: UartChannel> embedded_io::Write for Console<'_, U> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.uart.puts(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        // putc returns once the byte is accepted
        Ok(())
    }
}
