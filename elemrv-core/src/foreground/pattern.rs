//! Timed output pattern
//!
//! The foreground loop repeats a fixed sequence of (level, duration) steps
//! on the status LED. Durations are converted to timer ticks once, at
//! validation, so the loop itself has no failure path.

use heapless::Vec;

use crate::config::timing::ms_to_ticks;
use crate::error::Error;

/// Maximum steps in one pattern period
pub const MAX_PATTERN_STEPS: usize = 8;

/// Output level of the LED pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    High,
    Low,
}

/// One step of a pattern as configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkStep {
    pub level: Level,
    pub ms: u32,
}

impl BlinkStep {
    pub const fn high(ms: u32) -> Self {
        Self {
            level: Level::High,
            ms,
        }
    }

    pub const fn low(ms: u32) -> Self {
        Self {
            level: Level::Low,
            ms,
        }
    }
}

/// Heartbeat: ON 150 ms, OFF 50 ms, ON 150 ms, OFF 1000 ms
pub const HEARTBEAT: [BlinkStep; 4] = [
    BlinkStep::high(150),
    BlinkStep::low(50),
    BlinkStep::high(150),
    BlinkStep::low(1000),
];

/// One step with its duration in timer ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimedStep {
    pub level: Level,
    pub ticks: u32,
}

/// Validated pattern, ready to replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    steps: Vec<TimedStep, MAX_PATTERN_STEPS>,
}

impl Pattern {
    /// Convert configured steps for a timer running at `timer_hz`
    pub fn new(steps: &[BlinkStep], timer_hz: u32) -> Result<Self, Error> {
        if steps.is_empty() {
            return Err(Error::EmptyPattern);
        }

        let mut timed = Vec::new();
        for step in steps {
            let ticks = ms_to_ticks(step.ms, timer_hz)?;
            timed
                .push(TimedStep {
                    level: step.level,
                    ticks,
                })
                .map_err(|_| Error::PatternTooLong)?;
        }

        Ok(Self { steps: timed })
    }

    /// Steps of one period, in order
    pub fn steps(&self) -> &[TimedStep] {
        &self.steps
    }

    /// Length of one period in ticks
    pub fn period_ticks(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.ticks)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heartbeat_at_25mhz() {
        let pattern = Pattern::new(&HEARTBEAT, 25_000_000).unwrap();
        let steps = pattern.steps();

        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0], TimedStep { level: Level::High, ticks: 3_750_000 });
        assert_eq!(steps[1], TimedStep { level: Level::Low, ticks: 1_250_000 });
        assert_eq!(steps[2], TimedStep { level: Level::High, ticks: 3_750_000 });
        assert_eq!(steps[3], TimedStep { level: Level::Low, ticks: 25_000_000 });

        // 1350 ms period
        assert_eq!(pattern.period_ticks(), 33_750_000);
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(Pattern::new(&[], 25_000_000), Err(Error::EmptyPattern));
    }

    #[test]
    fn test_pattern_too_long() {
        let steps = [BlinkStep::high(1); MAX_PATTERN_STEPS + 1];
        assert_eq!(Pattern::new(&steps, 1_000), Err(Error::PatternTooLong));
    }

    #[test]
    fn test_step_overflow() {
        let steps = [BlinkStep::low(u32::MAX)];
        assert_eq!(Pattern::new(&steps, 25_000_000), Err(Error::TickOverflow));
    }
}
