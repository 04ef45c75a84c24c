use std::cell::Cell;
use std::rc::Rc;
use std::sync::OnceLock;
use std::time::Instant;

/// Source of monotonic ticks.
///
/// `Timer` and `StopWatch` query the frequency once at construction and the
/// counter on every live read. Implementations should never report a
/// frequency `<= 0`; constructors reject such sources with
/// [`ClockError::InvalidFrequency`](crate::ClockError::InvalidFrequency).
pub trait ClockSource {
    /// Counter frequency in ticks per second.
    fn ticks_per_second(&self) -> i64;

    /// Current counter value in ticks.
    fn counter(&self) -> i64;
}

impl<C: ClockSource + ?Sized> ClockSource for &C {
    #[inline]
    fn ticks_per_second(&self) -> i64 {
        (**self).ticks_per_second()
    }

    #[inline]
    fn counter(&self) -> i64 {
        (**self).counter()
    }
}

// ── MonotonicClock ────────────────────────────────────────────────────────

/// Nanoseconds per second; the tick rate of [`MonotonicClock`].
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Platform monotonic clock backed by [`Instant`].
///
/// Ticks are nanoseconds counted from a process-wide epoch taken on first use,
/// so every instance reports the same counter value at the same moment.
#[derive(Debug, Copy, Clone, Default)]
pub struct MonotonicClock;

impl MonotonicClock {
    pub fn new() -> Self {
        EPOCH.get_or_init(Instant::now);
        Self
    }
}

impl ClockSource for MonotonicClock {
    #[inline]
    fn ticks_per_second(&self) -> i64 {
        NANOS_PER_SECOND
    }

    fn counter(&self) -> i64 {
        let epoch = *EPOCH.get_or_init(Instant::now);
        // i64 nanoseconds cover ~292 years of uptime.
        i64::try_from(epoch.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }
}

// ── ManualClock ───────────────────────────────────────────────────────────

/// Hand-driven clock for tests and deterministic simulation.
///
/// Clones share one counter, so a test can keep a handle and move time while
/// a `Timer` owns another clone. The counter may be moved backwards to mimic
/// cross-core counter skew.
#[derive(Debug, Clone)]
pub struct ManualClock {
    ticks_per_second: i64,
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    /// Creates a clock at tick 0 with the given frequency.
    pub fn new(ticks_per_second: i64) -> Self {
        Self::starting_at(ticks_per_second, 0)
    }

    pub fn starting_at(ticks_per_second: i64, ticks: i64) -> Self {
        Self {
            ticks_per_second,
            now: Rc::new(Cell::new(ticks)),
        }
    }

    #[inline]
    pub fn now(&self) -> i64 {
        self.now.get()
    }

    #[inline]
    pub fn set(&self, ticks: i64) {
        self.now.set(ticks);
    }

    /// Moves the counter by `ticks` (negative values move it backwards).
    #[inline]
    pub fn advance(&self, ticks: i64) {
        self.now.set(self.now.get() + ticks);
    }
}

impl ClockSource for ManualClock {
    #[inline]
    fn ticks_per_second(&self) -> i64 {
        self.ticks_per_second
    }

    #[inline]
    fn counter(&self) -> i64 {
        self.now.get()
    }
}
