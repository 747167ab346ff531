//! Boot sequence and pattern loop
//!
//! The foreground context brings every peripheral up in a fixed order and
//! then drives the LED pattern forever. It never masks interrupts and never
//! touches a pin or register owned by the trap handler.

use core::convert::Infallible;

use elemrv_hal::{GpioPort, Hart, InterruptController, PinMask, TimerDevice, UartChannel};
use embedded_hal::digital::OutputPin;

use super::led::BlinkLed;
use super::pattern::Level;
use crate::config::{InterruptPlan, Platform};
use crate::context::Context;
use crate::dispatch::Dispatcher;
use crate::error::Error;

/// Foreground task of one platform
pub struct MainLoop<'a, U, G, C, T, H> {
    platform: &'a Platform,
    ctx: &'a Context<U, G, C>,
    timer: &'a T,
    hart: &'a H,
}

impl<'a, U, G, C, T, H> MainLoop<'a, U, G, C, T, H>
where
    U: UartChannel,
    G: GpioPort,
    C: InterruptController,
    T: TimerDevice,
    H: Hart,
{
    pub const fn new(
        platform: &'a Platform,
        ctx: &'a Context<U, G, C>,
        timer: &'a T,
        hart: &'a H,
    ) -> Self {
        Self {
            platform,
            ctx,
            timer,
            hart,
        }
    }

    /// Bring up the platform
    ///
    /// With interrupts configured, `dispatcher` must handle both the UART
    /// and the GPIO source before any source is enabled. Without them the
    /// hart stays masked and no trap vector is installed.
    pub fn boot(&self, dispatcher: Option<&Dispatcher<'_, U, G, C>>) -> Result<(), Error> {
        match &self.platform.interrupts {
            Some(plan) => {
                check_handlers(plan, dispatcher)?;
                self.boot_interrupt_driven(plan);
            }
            None => {
                if dispatcher.is_some() {
                    warn!("platform has no interrupts, dispatcher unused");
                }
                self.boot_polled();
            }
        }

        info!("{=str} up", self.platform.name);
        Ok(())
    }

    fn boot_interrupt_driven(&self, plan: &InterruptPlan) {
        let ctx = self.ctx;

        ctx.gpio.init();
        self.timer.init();
        ctx.controller.init();
        ctx.uart.init(self.platform.uart_divisor);

        self.hart.install_trap_vector();
        self.hart.unmask();

        ctx.controller.enable_source(plan.uart);
        ctx.controller.enable_source(plan.gpio);

        ctx.gpio.dir_set(PinMask::from(self.platform.blink_pin));
        ctx.uart.puts(self.platform.banner.as_bytes());

        ctx.uart.rx_irq_enable();
        ctx.gpio.irq_enable(plan.edge_pin, plan.edge);

        debug!(
            "sources {} and {} armed",
            plan.uart.get(),
            plan.gpio.get()
        );
    }

    fn boot_polled(&self) {
        let ctx = self.ctx;

        ctx.gpio.init();
        self.timer.init();
        ctx.uart.init(self.platform.uart_divisor);

        ctx.gpio.dir_set(PinMask::from(self.platform.blink_pin));
        ctx.uart.puts(self.platform.banner.as_bytes());
    }

    /// The LED driven by the pattern
    pub fn led(&self) -> BlinkLed<'a, G> {
        BlinkLed::new(&self.ctx.gpio, self.platform.blink_pin)
    }

    /// Play one period of the pattern
    pub fn run_pattern_once(&self) {
        let mut led = self.led();
        for step in self.platform.pattern.steps() {
            let result = match step.level {
                Level::High => led.set_high(),
                Level::Low => led.set_low(),
            };
            result.unwrap_or_else(|e| match e {});
            self.timer.sleep_for(step.ticks);
        }
    }

    /// Boot, then play the pattern forever
    pub fn run(&self, dispatcher: Option<&Dispatcher<'_, U, G, C>>) -> Result<Infallible, Error> {
        self.boot(dispatcher)?;
        loop {
            self.run_pattern_once();
        }
    }
}

fn check_handlers<U, G, C: InterruptController>(
    plan: &InterruptPlan,
    dispatcher: Option<&Dispatcher<'_, U, G, C>>,
) -> Result<(), Error> {
    for source in [plan.uart, plan.gpio] {
        let handled = dispatcher.is_some_and(|d| d.handles(source));
        if !handled {
            return Err(Error::UnhandledSource(source.get()));
        }
    }
    Ok(())
}
