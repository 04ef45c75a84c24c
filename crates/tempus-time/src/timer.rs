use crate::clock::{ClockSource, MonotonicClock};
use crate::error::{checked_frequency, ClockError};

/// Fraction of a second that [`Timer::advance`] steps frozen time by.
const ADVANCE_DIVISOR: i64 = 10;

/// All three timer readings taken from a single counter sample.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TimeValues {
    /// Relative time since the last reset, in seconds (excludes paused spans).
    pub time: f64,

    /// Counter reading in seconds, from the same sample as `time`.
    pub absolute_time: f64,

    /// Time since the previous elapsed-time query, in seconds. Never negative.
    pub elapsed_time: f64,
}

/// Run state of a [`Timer`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TimerState {
    Running,
    /// Paused; every adjusted read returns `frozen`.
    Stopped { frozen: i64 },
}

/// Pausable frame timer.
///
/// `Timer` separates two notions of "now":
/// - *live* time, a fresh counter sample, used by [`absolute_time`](Self::absolute_time)
/// - *adjusted* time, which is frozen while the timer is stopped, used by
///   [`time`](Self::time), [`elapsed_time`](Self::elapsed_time) and [`values`](Self::values)
///
/// This lets simulation time pause while telemetry keeps reading real time.
///
/// A new timer starts out stopped, frozen at the moment of construction: it reads
/// zero relative and elapsed time until [`reset`](Self::reset) or [`start`](Self::start)
/// is called. Poll it from one place, typically once per frame.
#[derive(Debug, Clone)]
pub struct Timer<C: ClockSource = MonotonicClock> {
    clock: C,
    ticks_per_second: i64,
    inv_ticks_per_second: f64,
    base_time: i64,
    elapsed_mark: i64,
    state: TimerState,
}

impl Timer {
    /// Creates a stopped timer on the platform monotonic clock.
    pub fn new() -> Self {
        let clock = MonotonicClock::new();
        let now = clock.counter();
        let ticks_per_second = clock.ticks_per_second();
        Self {
            clock,
            ticks_per_second,
            inv_ticks_per_second: 1.0 / ticks_per_second as f64,
            base_time: now,
            elapsed_mark: now,
            state: TimerState::Stopped { frozen: now },
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClockSource> Timer<C> {
    /// Creates a stopped timer on `clock`.
    ///
    /// Fails if the clock reports a non-positive frequency.
    pub fn with_clock(clock: C) -> Result<Self, ClockError> {
        let (ticks_per_second, inv_ticks_per_second) = checked_frequency(clock.ticks_per_second())?;
        let now = clock.counter();
        Ok(Self {
            clock,
            ticks_per_second,
            inv_ticks_per_second,
            base_time: now,
            elapsed_mark: now,
            state: TimerState::Stopped { frozen: now },
        })
    }

    /// Frozen counter value while stopped, otherwise a live sample.
    #[inline]
    fn adjusted_now(&self) -> i64 {
        match self.state {
            TimerState::Stopped { frozen } => frozen,
            TimerState::Running => self.clock.counter(),
        }
    }

    #[inline]
    fn to_secs(&self, ticks: i64) -> f64 {
        ticks as f64 * self.inv_ticks_per_second
    }

    /// Consumes the delta since the last elapsed query and advances the mark.
    fn take_elapsed(&mut self, now: i64) -> f64 {
        let elapsed = self.to_secs(now - self.elapsed_mark);
        self.elapsed_mark = now;

        // Counters read on different cores may disagree slightly.
        if elapsed < 0.0 {
            log::warn!("negative elapsed time ({elapsed:.9}s) clamped to zero");
            return 0.0;
        }
        elapsed
    }

    /// Restarts relative time at zero and puts the timer in the running state.
    pub fn reset(&mut self) {
        let now = self.clock.counter();
        self.base_time = now;
        self.elapsed_mark = now;
        self.state = TimerState::Running;
        log::debug!("timer reset at tick {now}");
    }

    /// Resumes a stopped timer. Has no effect while running.
    ///
    /// Time spent stopped is excluded from relative time, so `time()` continues
    /// from where it was frozen.
    pub fn start(&mut self) {
        let TimerState::Stopped { frozen } = self.state else {
            return;
        };

        let now = self.clock.counter();
        self.base_time += now - frozen;
        self.elapsed_mark = now;
        self.state = TimerState::Running;
        log::debug!("timer started at tick {now} (paused for {} ticks)", now - frozen);
    }

    /// Freezes adjusted time at the current counter value. Has no effect while stopped.
    pub fn stop(&mut self) {
        if self.is_stopped() {
            return;
        }

        let now = self.clock.counter();
        self.elapsed_mark = now;
        self.state = TimerState::Stopped { frozen: now };
        log::debug!("timer stopped at tick {now}");
    }

    /// Steps frozen time forward by a tenth of a second.
    ///
    /// Precondition: the timer is stopped. This is meant for single-stepping a
    /// paused simulation; called while running it does nothing.
    pub fn advance(&mut self) {
        match &mut self.state {
            TimerState::Stopped { frozen } => {
                *frozen += self.ticks_per_second / ADVANCE_DIVISOR;
                log::debug!("timer advanced to tick {frozen}");
            }
            TimerState::Running => {
                log::debug!("timer advance ignored while running");
            }
        }
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        matches!(self.state, TimerState::Stopped { .. })
    }

    #[inline]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[inline]
    pub fn ticks_per_second(&self) -> i64 {
        self.ticks_per_second
    }

    /// Live counter reading in seconds. Ignores the stopped state.
    pub fn absolute_time(&self) -> f64 {
        self.to_secs(self.clock.counter())
    }

    /// Seconds since the last reset, excluding time spent stopped.
    pub fn time(&self) -> f64 {
        self.to_secs(self.adjusted_now() - self.base_time)
    }

    /// Seconds since the previous call to this method or [`values`](Self::values).
    ///
    /// Never negative. Calling it twice in a row yields a near-zero second value.
    pub fn elapsed_time(&mut self) -> f64 {
        let now = self.adjusted_now();
        self.take_elapsed(now)
    }

    /// Reads relative, absolute and elapsed time from one adjusted sample.
    ///
    /// Unlike [`absolute_time`](Self::absolute_time), the absolute component is
    /// taken from the adjusted sample, so it stays frozen while stopped.
    pub fn values(&mut self) -> TimeValues {
        let now = self.adjusted_now();
        let elapsed_time = self.take_elapsed(now);

        TimeValues {
            time: self.to_secs(now - self.base_time),
            absolute_time: self.to_secs(now),
            elapsed_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const HZ: i64 = 10_000_000;
    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn timer_at(ticks: i64) -> (ManualClock, Timer<ManualClock>) {
        let clock = ManualClock::starting_at(HZ, ticks);
        let timer = Timer::with_clock(clock.clone()).unwrap();
        (clock, timer)
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn rejects_non_positive_frequency() {
        let err = Timer::with_clock(ManualClock::new(0)).unwrap_err();
        assert_eq!(err, ClockError::InvalidFrequency(0));
        assert!(Timer::with_clock(ManualClock::new(-1)).is_err());
    }

    #[test]
    fn new_timer_is_stopped_at_zero() {
        let (clock, mut timer) = timer_at(1_234);
        assert!(timer.is_stopped());
        assert_eq!(timer.state(), TimerState::Stopped { frozen: 1_234 });

        clock.advance(HZ);
        assert_close(timer.time(), 0.0);
        assert_close(timer.elapsed_time(), 0.0);
    }

    #[test]
    fn start_on_fresh_timer_behaves_like_reset() {
        let (clock, mut timer) = timer_at(0);
        clock.set(3 * HZ);
        timer.start();
        assert!(!timer.is_stopped());
        assert_close(timer.time(), 0.0);

        clock.advance(HZ / 2);
        assert_close(timer.time(), 0.5);
    }

    #[test]
    fn platform_timer_resets_near_zero() {
        let mut timer = Timer::new();
        timer.reset();
        assert!(timer.time() < 0.05);
        assert!(timer.time() >= 0.0);
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_zeroes_relative_time() {
        let (clock, mut timer) = timer_at(0);
        timer.reset();
        clock.advance(2 * HZ);
        assert_close(timer.time(), 2.0);

        timer.reset();
        assert_close(timer.time(), 0.0);
        assert_close(timer.elapsed_time(), 0.0);
    }

    #[test]
    fn reset_while_stopped_resumes_from_live_counter() {
        let (clock, mut timer) = timer_at(0);
        timer.reset();
        clock.set(HZ);
        timer.stop();
        clock.set(5 * HZ);

        timer.reset();
        assert!(!timer.is_stopped());
        assert_close(timer.time(), 0.0);
        clock.advance(HZ);
        assert_close(timer.time(), 1.0);
    }

    // ── stop / start ──────────────────────────────────────────────────────

    #[test]
    fn stop_freezes_relative_but_not_absolute_time() {
        let (clock, mut timer) = timer_at(0);
        timer.reset();
        clock.set(HZ);
        timer.stop();

        let frozen = timer.time();
        let abs_before = timer.absolute_time();
        for _ in 0..5 {
            clock.advance(HZ / 4);
            assert_close(timer.time(), frozen);
            assert_close(timer.elapsed_time(), 0.0);
        }
        assert_close(timer.absolute_time() - abs_before, 1.25);
    }

    #[test]
    fn start_preserves_continuity() {
        let (clock, mut timer) = timer_at(0);
        timer.reset();
        clock.set(3 * HZ);
        let before = timer.time();
        timer.stop();

        clock.advance(40 * HZ);
        timer.start();
        assert_close(timer.time(), before);
    }

    #[test]
    fn start_while_running_is_noop() {
        let (clock, mut timer) = timer_at(0);
        timer.reset();
        clock.set(HZ);
        timer.start();
        assert_close(timer.time(), 1.0);
        // The elapsed mark is untouched, so the full second is still reported.
        assert_close(timer.elapsed_time(), 1.0);
    }

    #[test]
    fn stop_while_stopped_keeps_first_freeze() {
        let (clock, mut timer) = timer_at(0);
        timer.reset();
        clock.set(HZ);
        timer.stop();
        clock.set(2 * HZ);
        timer.stop();
        assert_eq!(timer.state(), TimerState::Stopped { frozen: HZ });
    }

    // ── advance ───────────────────────────────────────────────────────────

    #[test]
    fn advance_steps_frozen_time_by_a_tenth() {
        let (clock, mut timer) = timer_at(0);
        timer.reset();
        clock.set(HZ);
        timer.stop();

        let before = timer.time();
        timer.advance();
        assert!(timer.is_stopped());
        assert_close(timer.time() - before, 0.1);
        assert_eq!(timer.state(), TimerState::Stopped { frozen: HZ + HZ / 10 });
    }

    #[test]
    fn advance_yields_one_step_of_elapsed_time() {
        let (clock, mut timer) = timer_at(0);
        timer.reset();
        clock.set(HZ);
        timer.stop();
        assert_close(timer.elapsed_time(), 0.0);

        timer.advance();
        assert_close(timer.elapsed_time(), 0.1);
        assert_close(timer.elapsed_time(), 0.0);
    }

    #[test]
    fn advance_while_running_is_ignored() {
        let (clock, mut timer) = timer_at(0);
        timer.reset();
        clock.set(HZ);
        timer.advance();
        assert!(!timer.is_stopped());
        assert_close(timer.time(), 1.0);
    }

    // ── elapsed ───────────────────────────────────────────────────────────

    #[test]
    fn elapsed_consumes_the_delta() {
        let (clock, mut timer) = timer_at(0);
        timer.reset();
        clock.advance(HZ / 50);
        assert_close(timer.elapsed_time(), 0.02);
        assert_close(timer.elapsed_time(), 0.0);
    }

    #[test]
    fn elapsed_clamps_counter_going_backwards() {
        let (clock, mut timer) = timer_at(HZ);
        timer.reset();
        clock.advance(-HZ / 2);
        assert_eq!(timer.elapsed_time(), 0.0);

        // The mark followed the counter back, so the next delta is measured from there.
        clock.advance(HZ / 10);
        assert_close(timer.elapsed_time(), 0.1);
    }

    #[test]
    fn elapsed_never_negative_over_mixed_sequence() {
        let (clock, mut timer) = timer_at(0);
        let steps: [i64; 10] = [5, -3, 0, 12, -40, 7, 1, -1, 100, -100];
        timer.reset();
        for (i, step) in steps.iter().enumerate() {
            clock.advance(step * 1_000);
            match i % 4 {
                0 => timer.stop(),
                1 => timer.advance(),
                2 => timer.start(),
                _ => {}
            }
            assert!(timer.elapsed_time() >= 0.0);
            assert!(timer.values().elapsed_time >= 0.0);
        }
    }

    // ── values ────────────────────────────────────────────────────────────

    #[test]
    fn values_share_one_sample() {
        let (clock, mut timer) = timer_at(2 * HZ);
        timer.reset();
        clock.advance(HZ / 4);

        let v = timer.values();
        assert_close(v.time, 0.25);
        assert_close(v.absolute_time, 2.25);
        assert_close(v.elapsed_time, 0.25);

        // The elapsed mark moved with the call.
        assert_close(timer.elapsed_time(), 0.0);
    }

    #[test]
    fn values_absolute_component_is_frozen_while_stopped() {
        let (clock, mut timer) = timer_at(0);
        timer.reset();
        clock.set(HZ);
        timer.stop();
        clock.set(9 * HZ);

        let v = timer.values();
        assert_close(v.absolute_time, 1.0);
        assert_close(timer.absolute_time(), 9.0);
    }

    #[test]
    fn values_clamp_negative_elapsed() {
        let (clock, mut timer) = timer_at(HZ);
        timer.reset();
        clock.advance(-HZ / 10);
        let v = timer.values();
        assert_eq!(v.elapsed_time, 0.0);
        assert_close(v.time, -0.1);
    }

    // ── scenario ──────────────────────────────────────────────────────────

    #[test]
    fn pause_single_step_resume_scenario() {
        let (clock, mut timer) = timer_at(0);
        timer.reset();

        clock.set(5_000_000);
        assert_close(timer.time(), 0.5);

        timer.stop();
        timer.advance();
        assert_close(timer.time(), 0.6);

        clock.set(8_000_000);
        timer.start();
        assert_close(timer.time(), 0.6);

        clock.set(9_000_000);
        assert_close(timer.time(), 0.7);
    }
}
