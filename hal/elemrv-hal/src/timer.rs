//! Machine timer abstraction

/// Free-running counter with a blocking wait
///
/// Only the foreground context may wait on the timer; the trap handler
/// runs masked and must stay short.
pub trait TimerDevice {
    /// Reset the counter
    fn init(&self);

    /// Spin until the counter has advanced by `ticks`
    ///
    /// There is no yield point. A counter that never advances stalls the
    /// caller forever.
    fn sleep_for(&self, ticks: u32);
}
