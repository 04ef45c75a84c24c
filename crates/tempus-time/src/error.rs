use std::fmt;

/// Construction error for clock-backed timers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClockError {
    /// The clock source reported a frequency `<= 0` ticks per second.
    InvalidFrequency(i64),
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFrequency(hz) => {
                write!(f, "clock frequency must be positive, got {hz} ticks/s")
            }
        }
    }
}

impl std::error::Error for ClockError {}

/// Validates a clock frequency and returns it with its cached reciprocal.
pub(crate) fn checked_frequency(ticks_per_second: i64) -> Result<(i64, f64), ClockError> {
    if ticks_per_second <= 0 {
        return Err(ClockError::InvalidFrequency(ticks_per_second));
    }
    Ok((ticks_per_second, 1.0 / ticks_per_second as f64))
}
