//! Shared backup water source drawdown
//!
//! All active systems draw from the same reservoir. The reservoir drains at
//! the sum of the systems' average flows minus whatever refill is feeding it.

use crate::core_types::runtime::Runtime;
use crate::core_types::units::{Gallons, GallonsPerMinute};
use crate::hydration::ZoneCycleStats;
use serde::Serialize;

/// Drawdown of the backup source under the combined demand
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackupSourceRuntime {
    /// Combined average demand of the active systems
    pub total_average_flow: GallonsPerMinute,

    /// Refill feeding the source
    pub refill_rate: GallonsPerMinute,

    /// `total_average_flow - refill_rate` in GPM. Negative when refill
    /// outpaces demand, so this is a plain f64 rather than a flow rate.
    pub net_draw: f64,

    /// Time until the source runs dry
    pub runtime: Runtime,
}

/// Sum the average flow of every system drawing on the source
pub fn total_average_flow<'a>(
    stats: impl IntoIterator<Item = &'a ZoneCycleStats>,
) -> GallonsPerMinute {
    stats.into_iter().map(|s| s.average_flow).sum()
}

/// Estimate how long the backup source lasts
///
/// All inputs are sanitized. An empty source or zero demand is
/// [`Runtime::NotApplicable`]; a refill rate that matches or exceeds demand is
/// [`Runtime::Unlimited`].
///
/// # Example
/// ```
/// use backup_runtime_core::compute_backup_runtime;
///
/// let backup = compute_backup_runtime(20.0, 6000.0, 5.0);
/// assert_eq!(backup.net_draw, 15.0);
/// assert_eq!(backup.runtime.to_string(), "6h 40m");
/// ```
#[must_use]
pub fn compute_backup_runtime(
    total_average_flow: impl Into<f64>,
    source_volume: impl Into<f64>,
    refill_rate: impl Into<f64>,
) -> BackupSourceRuntime {
    let demand = GallonsPerMinute::sanitized(total_average_flow.into());
    let volume = Gallons::sanitized(source_volume.into());
    let refill = GallonsPerMinute::sanitized(refill_rate.into());

    let net_draw = demand.value() - refill.value();

    let runtime = if volume.is_zero() || demand.is_zero() {
        Runtime::NotApplicable
    } else if net_draw <= 0.0 {
        Runtime::Unlimited
    } else {
        Runtime::Finite(volume / GallonsPerMinute::new(net_draw))
    };

    BackupSourceRuntime {
        total_average_flow: demand,
        refill_rate: refill,
        net_draw,
        runtime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::Minutes;
    use crate::hydration::compute_zone_cycle;

    #[test]
    fn test_finite_drawdown() {
        let backup = compute_backup_runtime(20.0, 6000.0, 5.0);
        assert_eq!(backup.net_draw, 15.0);
        assert_eq!(backup.runtime, Runtime::Finite(Minutes::new(400.0)));
        assert_eq!(backup.runtime.to_string(), "6h 40m");
    }

    #[test]
    fn test_refill_exceeding_demand_is_unlimited() {
        let backup = compute_backup_runtime(10.0, 6000.0, 15.0);
        assert_eq!(backup.net_draw, -5.0);
        assert_eq!(backup.runtime, Runtime::Unlimited);
    }

    #[test]
    fn test_refill_equal_to_demand_is_unlimited() {
        let backup = compute_backup_runtime(12.5, 6000.0, 12.5);
        assert_eq!(backup.net_draw, 0.0);
        assert_eq!(backup.runtime, Runtime::Unlimited);
    }

    #[test]
    fn test_missing_demand_or_volume_is_not_applicable() {
        assert_eq!(
            compute_backup_runtime(0.0, 20000.0, 0.0).runtime,
            Runtime::NotApplicable
        );
        assert_eq!(
            compute_backup_runtime(10.0, 0.0, 0.0).runtime,
            Runtime::NotApplicable
        );
        // Not applicable takes precedence over unlimited
        assert_eq!(
            compute_backup_runtime(0.0, 20000.0, 50.0).runtime,
            Runtime::NotApplicable
        );
    }

    #[test]
    fn test_negative_refill_is_ignored() {
        let backup = compute_backup_runtime(20.0, 6000.0, -100.0);
        assert!(backup.refill_rate.is_zero());
        assert_eq!(backup.net_draw, 20.0);
        assert_eq!(backup.runtime.minutes(), Some(Minutes::new(300.0)));
    }

    #[test]
    fn test_total_average_flow_sums_systems() {
        let a = compute_zone_cycle(6, &[20.0; 9]);
        let b = compute_zone_cycle(1, &[35.0]);
        let total = total_average_flow([&a, &b]);
        assert!((*total - (600.0 / 35.0 + 175.0 / 35.0)).abs() < 1e-12);
        assert!(total_average_flow(std::iter::empty()).is_zero());
    }
}
