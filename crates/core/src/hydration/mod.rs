//! Maintenance hydration zone sequencing
//!
//! Each system waters its zones one at a time for a fixed 5 minutes, then
//! rests for a break set by its zone count. This module turns a zone count
//! and per-zone flows into cycle timing, duty cycle and average flow.

pub mod cycle;
pub mod schedule;

pub use cycle::{compute_zone_cycle, ZoneCycleStats};
pub use schedule::{BreakSchedule, ZoneCount, MAX_ZONES, RUN_MINUTES_PER_ZONE};
