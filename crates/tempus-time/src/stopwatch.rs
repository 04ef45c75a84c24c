use crate::clock::{ClockSource, MonotonicClock};
use crate::error::{checked_frequency, ClockError};

/// Measures one bracketed interval: [`start`](Self::start), then [`end`](Self::end),
/// then read the difference.
///
/// There is no clamping and no state machine. Reading before both `start` and
/// `end` have been called is a caller error: the result is computed from
/// zero-initialized marks and carries no meaning (it may be negative).
#[derive(Debug, Clone)]
pub struct StopWatch<C: ClockSource = MonotonicClock> {
    clock: C,
    ticks_per_second: i64,
    inv_ticks_per_second: f64,
    start_time: i64,
    end_time: i64,
}

impl StopWatch {
    pub fn new() -> Self {
        let clock = MonotonicClock::new();
        let ticks_per_second = clock.ticks_per_second();
        Self {
            clock,
            ticks_per_second,
            inv_ticks_per_second: 1.0 / ticks_per_second as f64,
            start_time: 0,
            end_time: 0,
        }
    }
}

impl Default for StopWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClockSource> StopWatch<C> {
    pub fn with_clock(clock: C) -> Result<Self, ClockError> {
        let (ticks_per_second, inv_ticks_per_second) = checked_frequency(clock.ticks_per_second())?;
        Ok(Self {
            clock,
            ticks_per_second,
            inv_ticks_per_second,
            start_time: 0,
            end_time: 0,
        })
    }

    #[inline]
    pub fn start(&mut self) {
        self.start_time = self.clock.counter();
        log::trace!("stopwatch start at tick {}", self.start_time);
    }

    #[inline]
    pub fn end(&mut self) {
        self.end_time = self.clock.counter();
        log::trace!("stopwatch end at tick {}", self.end_time);
    }

    /// Brackets `f` with [`start`](Self::start) and [`end`](Self::end).
    pub fn measure<R>(&mut self, f: impl FnOnce() -> R) -> R {
        self.start();
        let out = f();
        self.end();
        out
    }

    #[inline]
    pub fn ticks_per_second(&self) -> i64 {
        self.ticks_per_second
    }

    /// Bracketed interval in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        (self.end_time - self.start_time) as f64 * self.inv_ticks_per_second
    }

    /// Bracketed interval in milliseconds.
    pub fn elapsed_msecs(&self) -> f64 {
        (self.end_time - self.start_time) as f64 * 1000.0 * self.inv_ticks_per_second
    }
}
