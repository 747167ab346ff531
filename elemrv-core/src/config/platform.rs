//! Platform configuration
//!
//! Memory map, clocks and interrupt wiring of one ElemRV variant. The raw
//! [`PlatformConfig`] is what a board supplies; [`PlatformConfig::validate`]
//! turns it into a checked [`Platform`] before anything touches hardware.

use heapless::Vec;

use elemrv_hal::{Edge, Pin, SourceId, MAX_SOURCES};

use super::timing::uart_divisor;
use crate::error::Error;
use crate::foreground::pattern::{BlinkStep, Pattern, HEARTBEAT};

/// UART base address on the reference memory map
pub const UART0_BASE: usize = 0xf000_0000;
/// GPIO base address on the reference memory map
pub const GPIO0_BASE: usize = 0xf000_1000;
/// Machine timer base address on the reference memory map
pub const MTIMER_BASE: usize = 0xf002_0000;
/// Platform interrupt controller base address on the reference memory map
pub const PLIC_BASE: usize = 0xf00f_0000;

/// Reference peripheral clock (25 MHz)
pub const REFERENCE_CLOCK_HZ: u32 = 25_000_000;

/// Number of peripherals with a base address (UART, GPIO, timer, controller)
const MAX_MAPPED: usize = 4;

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Register block base address
    pub base: usize,
    /// Peripheral clock feeding the baud generator
    pub clock_hz: u32,
    /// Line rate
    pub baud: u32,
    /// Data bits per frame
    pub frame_bits: u8,
    /// Extra bit times per frame counted by the baud generator
    pub framing_overhead: u8,
}

/// GPIO configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioConfig {
    pub base: usize,
    /// Output pin owned by the foreground loop
    pub blink_pin: u8,
}

/// Machine timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    pub base: usize,
    /// Counter increment rate
    pub frequency_hz: u32,
}

/// Interrupt wiring, present only on variants that use the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptConfig {
    /// Controller register block base address
    pub controller_base: usize,
    /// Number of source lines the controller provides
    pub num_sources: u8,
    /// Controller line of the UART receive interrupt
    pub uart_source: u8,
    /// Controller line of the GPIO port interrupt
    pub gpio_source: u8,
    /// Input pin owned by the trap handler
    pub edge_pin: u8,
    /// Edge that raises the GPIO interrupt
    pub edge: Edge,
}

/// Board description as supplied by the integrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Variant name
    pub name: &'static str,
    /// Bytes written to the UART once at boot
    pub banner: &'static str,
    pub uart: UartConfig,
    pub gpio: GpioConfig,
    pub timer: TimerConfig,
    /// `None` runs the variant without interrupts
    pub interrupts: Option<InterruptConfig>,
    /// Foreground LED pattern, one period
    pub pattern: &'static [BlinkStep],
}

impl PlatformConfig {
    /// Interrupt-driven variant: UART echo and GPIO edge diagnostic
    pub const fn elemrv_n() -> Self {
        Self {
            name: "ElemRV-N",
            banner: "\r\nElemRV-N 0.2\r\n>- ",
            uart: reference_uart(),
            gpio: reference_gpio(),
            timer: reference_timer(),
            interrupts: Some(InterruptConfig {
                controller_base: PLIC_BASE,
                num_sources: MAX_SOURCES,
                uart_source: 0,
                gpio_source: 1,
                edge_pin: 3,
                edge: Edge::Falling,
            }),
            pattern: &HEARTBEAT,
        }
    }

    /// Polled variant: banner and blink only
    pub const fn elemrv_h() -> Self {
        Self {
            name: "ElemRV-H",
            banner: "\r\nElemRV-H\r\n>- ",
            uart: reference_uart(),
            gpio: reference_gpio(),
            timer: reference_timer(),
            interrupts: None,
            pattern: &HEARTBEAT,
        }
    }

    /// Check the configuration and derive the values the hardware needs
    pub fn validate(&self) -> Result<Platform, Error> {
        let uart_divisor = uart_divisor(
            self.uart.clock_hz,
            self.uart.baud,
            self.uart.frame_bits,
            self.uart.framing_overhead,
        )?;
        let blink_pin = Pin::new(self.gpio.blink_pin)?;
        let pattern = Pattern::new(self.pattern, self.timer.frequency_hz)?;

        self.check_memory_map()?;

        let interrupts = match &self.interrupts {
            Some(irq) => Some(irq.plan(blink_pin)?),
            None => None,
        };

        Ok(Platform {
            name: self.name,
            banner: self.banner,
            uart_divisor,
            blink_pin,
            pattern,
            interrupts,
        })
    }

    fn check_memory_map(&self) -> Result<(), Error> {
        let mut bases: Vec<usize, MAX_MAPPED> = Vec::new();
        let controller = self.interrupts.as_ref().map(|irq| irq.controller_base);

        for base in [Some(self.uart.base), Some(self.gpio.base), Some(self.timer.base), controller]
            .into_iter()
            .flatten()
        {
            if bases.contains(&base) {
                return Err(Error::AddressConflict(base));
            }
            bases.push(base).map_err(|_| Error::AddressConflict(base))?;
        }

        Ok(())
    }
}

const fn reference_uart() -> UartConfig {
    UartConfig {
        base: UART0_BASE,
        clock_hz: REFERENCE_CLOCK_HZ,
        baud: 115_200,
        frame_bits: 8,
        framing_overhead: 0,
    }
}

const fn reference_gpio() -> GpioConfig {
    GpioConfig {
        base: GPIO0_BASE,
        blink_pin: 0,
    }
}

const fn reference_timer() -> TimerConfig {
    TimerConfig {
        base: MTIMER_BASE,
        frequency_hz: REFERENCE_CLOCK_HZ,
    }
}

impl InterruptConfig {
    fn plan(&self, blink_pin: Pin) -> Result<InterruptPlan, Error> {
        let num_sources = if self.num_sources > MAX_SOURCES {
            warn!(
                "controller reports {} sources, using {}",
                self.num_sources,
                MAX_SOURCES
            );
            MAX_SOURCES
        } else {
            self.num_sources
        };

        let uart = source(self.uart_source, num_sources)?;
        let gpio = source(self.gpio_source, num_sources)?;
        if uart == gpio {
            return Err(Error::DuplicateSource(uart.get()));
        }

        let edge_pin = Pin::new(self.edge_pin)?;
        if edge_pin == blink_pin {
            return Err(Error::PinConflict(edge_pin.number()));
        }

        Ok(InterruptPlan {
            num_sources,
            uart,
            gpio,
            edge_pin,
            edge: self.edge,
        })
    }
}

fn source(id: u8, num_sources: u8) -> Result<SourceId, Error> {
    let source = SourceId::new(id)?;
    if id >= num_sources {
        return Err(Error::InvalidSource(id));
    }
    Ok(source)
}

/// Checked interrupt wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptPlan {
    pub num_sources: u8,
    pub uart: SourceId,
    pub gpio: SourceId,
    pub edge_pin: Pin,
    pub edge: Edge,
}

/// Validated platform, consumed by boot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub name: &'static str,
    pub banner: &'static str,
    pub uart_divisor: u32,
    pub blink_pin: Pin,
    pub pattern: Pattern,
    pub interrupts: Option<InterruptPlan>,
}
