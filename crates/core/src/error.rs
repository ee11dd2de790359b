//! Structural errors
//!
//! None of these are produced by numeric input values; bad numbers are
//! sanitized to zero. They only cover table construction and addressing
//! a system or zone slot that does not exist.

use thiserror::Error;

/// Errors raised while building a [`BreakSchedule`](crate::hydration::BreakSchedule)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// An entry was keyed outside the supported zone range
    #[error("zone count {zones} is outside the supported range 1..={max}")]
    ZoneOutOfRange { zones: u8, max: u8 },

    /// The same zone count was listed twice
    #[error("zone count {0} has more than one break entry")]
    DuplicateZone(u8),

    /// A zone count in the supported range has no entry
    #[error("zone count {0} has no break entry")]
    MissingZone(u8),

    /// Break length must be finite and non-negative
    #[error("break for {zones} zone(s) must be finite and non-negative, got {minutes}")]
    InvalidMinutes { zones: u8, minutes: f64 },
}

/// Errors raised by configuration updates and scenario parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("system index {index} is out of range (at most {max} systems)")]
    SystemIndexOutOfRange { index: usize, max: usize },

    #[error("zone index {index} is out of range (at most {max} zones)")]
    ZoneIndexOutOfRange { index: usize, max: usize },

    #[error("foam tank size {0} gal is not one of 0, 25, 50, 100, 150")]
    UnsupportedFoamTank(u32),

    #[error("scenario configures {count} systems, at most {max} are supported")]
    TooManySystems { count: usize, max: usize },
}
