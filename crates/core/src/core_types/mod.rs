//! Core types and utilities

pub mod runtime;
pub mod units;

pub use runtime::{HoursMinutes, Runtime};
pub use units::*;
