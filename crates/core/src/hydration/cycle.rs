//! Per-system zone cycle statistics
//!
//! One cycle is every zone running back to back for [`RUN_MINUTES_PER_ZONE`],
//! followed by the break from the [`BreakSchedule`]. Averaging the delivered
//! volume over the whole cycle (break included) gives the time-weighted flow
//! that every downstream runtime projection uses.

use super::schedule::{BreakSchedule, ZoneCount, RUN_MINUTES_PER_ZONE};
use crate::core_types::units::{Fraction, Gallons, GallonsPerMinute, Minutes};
use serde::Serialize;

/// Derived statistics for one system's zone cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneCycleStats {
    /// Zones actually sequenced (after clamping)
    pub zone_count: ZoneCount,

    /// Pause after the last zone
    pub break_minutes: Minutes,

    /// Fixed per-zone run time
    pub run_minutes_per_zone: Minutes,

    /// `run_minutes_per_zone × zone_count`
    pub total_run_minutes: Minutes,

    /// Water delivered by one full cycle
    pub total_volume_per_cycle: Gallons,

    /// `total_run_minutes + break_minutes`
    pub cycle_minutes: Minutes,

    /// Fraction of the cycle spent running (0-1)
    pub duty_cycle: Fraction,

    /// Time-weighted flow over the whole cycle, break included.
    /// This is not the arithmetic mean of the zone flows.
    pub average_flow: GallonsPerMinute,

    /// Sanitized flows of the zones that run, in order
    pub active_flows: Vec<GallonsPerMinute>,
}

impl BreakSchedule {
    /// Compute cycle statistics for a system using this schedule
    ///
    /// Only the first `zones` entries of `flows` are used. Non-finite or
    /// negative flows count as 0, as do slots missing from a short slice.
    #[must_use]
    pub fn zone_cycle(&self, zones: ZoneCount, flows: &[f64]) -> ZoneCycleStats {
        let active_flows: Vec<GallonsPerMinute> = (0..zones.as_usize())
            .map(|i| GallonsPerMinute::sanitized(flows.get(i).copied().unwrap_or(0.0)))
            .collect();

        let run_minutes_per_zone = Minutes::new(RUN_MINUTES_PER_ZONE);
        let break_minutes = self.break_minutes(zones);

        let total_run_minutes = run_minutes_per_zone * f64::from(zones.get());
        let total_volume_per_cycle =
            active_flows.iter().copied().sum::<GallonsPerMinute>() * run_minutes_per_zone;
        let cycle_minutes = total_run_minutes + break_minutes;

        // cycle_minutes is at least 5 with any valid schedule, guard anyway
        let (duty_cycle, average_flow) = if *cycle_minutes > 0.0 {
            (
                Fraction::clamped(total_run_minutes / cycle_minutes),
                total_volume_per_cycle / cycle_minutes,
            )
        } else {
            (Fraction::default(), GallonsPerMinute::ZERO)
        };

        ZoneCycleStats {
            zone_count: zones,
            break_minutes,
            run_minutes_per_zone,
            total_run_minutes,
            total_volume_per_cycle,
            cycle_minutes,
            duty_cycle,
            average_flow,
            active_flows,
        }
    }
}

/// Compute cycle statistics with the standard maintenance hydration schedule
///
/// `zone_count` is clamped to `1..=9`; zero or negative counts run one zone.
///
/// # Example
/// ```
/// use backup_runtime_core::compute_zone_cycle;
///
/// let stats = compute_zone_cycle(6, &[20.0; 9]);
/// assert_eq!(*stats.cycle_minutes, 35.0);
/// assert!((*stats.average_flow - 600.0 / 35.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn compute_zone_cycle(zone_count: i64, flows: &[f64]) -> ZoneCycleStats {
    BreakSchedule::maintenance_hydration().zone_cycle(ZoneCount::clamped(zone_count), flows)
}
