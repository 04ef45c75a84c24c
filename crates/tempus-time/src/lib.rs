//! Tempus time crate.
//!
//! Monotonic time measurement for real-time loops:
//! - [`Timer`]: pausable frame timer giving relative, absolute and per-poll elapsed time
//! - [`StopWatch`]: one-shot interval measurement for ad hoc benchmarking
//!
//! Both read ticks from a [`ClockSource`]. [`MonotonicClock`] is the platform clock;
//! [`ManualClock`] is a hand-driven clock for tests and deterministic simulation.
//!
//! Instances are single-threaded; keep one per poller.

pub mod clock;
pub mod logging;

mod error;
mod stopwatch;
mod timer;

pub use clock::{ClockSource, ManualClock, MonotonicClock};
pub use error::ClockError;
pub use stopwatch::StopWatch;
pub use timer::{TimeValues, Timer, TimerState};
