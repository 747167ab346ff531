//! Status LED output pin

use core::convert::Infallible;

use elemrv_hal::{GpioPort, Pin};
use embedded_hal::digital::{ErrorType, OutputPin};

/// One GPIO output exposed as an [`OutputPin`]
pub struct BlinkLed<'a, G> {
    gpio: &'a G,
    pin: Pin,
}

impl<'a, G: GpioPort> BlinkLed<'a, G> {
    pub const fn new(gpio: &'a G, pin: Pin) -> Self {
        Self { gpio, pin }
    }
}

impl<G: GpioPort> ErrorType for BlinkLed<'_, G> {
    type Error = Infallible;
}

impl<G: GpioPort> OutputPin for BlinkLed<'_, G> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.gpio.value_clr(self.pin);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.gpio.value_set(self.pin);
        Ok(())
    }
}
