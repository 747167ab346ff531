//! Shared test bench helpers

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use elemrv_core::config::{InterruptPlan, Platform, PlatformConfig};
use elemrv_core::Context;
use elemrv_hal::{Pin, TimerDevice};
use elemrv_sim::{Event, SimController, SimGpio, SimSoc, SimTimer, SimUart};

pub type SimContext<'s> = Context<&'s SimUart, &'s SimGpio, &'s SimController>;

/// Validated interrupt-driven platform and its wiring
pub fn elemrv_n() -> (Platform, InterruptPlan) {
    let platform = PlatformConfig::elemrv_n().validate().unwrap();
    let plan = platform.interrupts.unwrap();
    (platform, plan)
}

pub fn soc_for(plan: &InterruptPlan) -> SimSoc {
    SimSoc::new(plan.uart, plan.gpio)
}

pub fn pin(n: u8) -> Pin {
    Pin::new(n).unwrap()
}

/// Events of the foreground pattern only
pub fn pattern_events(events: &[Event], blink: u8) -> Vec<Event> {
    events
        .iter()
        .copied()
        .filter(|e| match e {
            Event::GpioSet(p) | Event::GpioClr(p) => *p == blink,
            Event::Slept(_) => true,
            _ => false,
        })
        .collect()
}

/// Timer that lets pending traps preempt the foreground after every wait
///
/// Each wait first applies the next queued stimulus, then takes whatever
/// traps the simulated SoC would deliver at that instant.
pub struct PreemptingTimer<'t> {
    timer: &'t SimTimer,
    stimulus: RefCell<VecDeque<Box<dyn FnOnce() + 't>>>,
    preempt: Box<dyn Fn() -> usize + 't>,
    traps: RefCell<Vec<usize>>,
}

impl<'t> PreemptingTimer<'t> {
    pub fn new(timer: &'t SimTimer, preempt: impl Fn() -> usize + 't) -> Self {
        Self {
            timer,
            stimulus: RefCell::new(VecDeque::new()),
            preempt: Box::new(preempt),
            traps: RefCell::new(Vec::new()),
        }
    }

    /// Queue stimulus for the next wait that has none
    pub fn then(&self, stimulus: impl FnOnce() + 't) {
        self.stimulus.borrow_mut().push_back(Box::new(stimulus));
    }

    /// Traps taken after each wait so far
    pub fn traps(&self) -> Vec<usize> {
        self.traps.borrow().clone()
    }
}

impl TimerDevice for PreemptingTimer<'_> {
    fn init(&self) {
        self.timer.init();
    }

    fn sleep_for(&self, ticks: u32) {
        self.timer.sleep_for(ticks);

        let next = self.stimulus.borrow_mut().pop_front();
        if let Some(stimulus) = next {
            stimulus();
        }

        let taken = (self.preempt)();
        self.traps.borrow_mut().push(taken);
    }
}
