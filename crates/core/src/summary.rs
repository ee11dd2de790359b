//! Derived runtime summary
//!
//! Fans a configuration out through the calculators in one pure pass:
//!
//! ```text
//! per-zone flows ─► zone cycle ─┬─► foam runtime (per active system)
//!                               └─► total average flow ─► backup runtime
//! pool helper ─► volume estimate (advisory)
//! ```

use crate::config::CalculatorConfig;
use crate::core_types::units::GallonsPerMinute;
use crate::hydration::ZoneCycleStats;
use crate::supply::{
    compute_backup_runtime, total_average_flow, BackupSourceRuntime, FoamRuntime, FoamTankSize,
    PoolVolumeEstimate,
};
use serde::Serialize;
use tracing::debug;

/// Derived figures for one active system
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSummary {
    /// Slot position (0-based)
    pub index: usize,
    pub stats: ZoneCycleStats,
    pub foam_tank: FoamTankSize,
    pub foam: FoamRuntime,
}

/// Everything the calculator reports for a configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeSummary {
    /// Active systems in slot order
    pub systems: Vec<SystemSummary>,

    /// Sum of the active systems' average flows, sanitized as the backup
    /// calculator sees it (an overflowed sum is 0)
    pub total_average_flow: GallonsPerMinute,

    pub backup: BackupSourceRuntime,

    /// Advisory estimate from the pool/tank helper
    pub pool: PoolVolumeEstimate,
}

impl RuntimeSummary {
    /// Recompute every derived value from `config`
    ///
    /// Pure: deriving twice from the same configuration gives identical
    /// results.
    #[must_use]
    pub fn derive(config: &CalculatorConfig) -> Self {
        let systems: Vec<SystemSummary> = config
            .active_systems()
            .iter()
            .enumerate()
            .map(|(index, system)| {
                let stats = system.zone_cycle();
                let foam = system.foam_runtime(&stats);
                SystemSummary {
                    index,
                    stats,
                    foam_tank: system.foam_tank(),
                    foam,
                }
            })
            .collect();

        let source = config.backup_source();
        let backup = compute_backup_runtime(
            total_average_flow(systems.iter().map(|s| &s.stats)),
            source.volume,
            source.refill_rate,
        );
        // Report the sanitized demand the runtime was computed from
        let total_average_flow = backup.total_average_flow;

        let pool = config.pool_helper().estimate();

        debug!(
            active_systems = systems.len(),
            total_average_flow = %total_average_flow,
            net_draw = backup.net_draw,
            backup_runtime = %backup.runtime,
            "derived runtime summary"
        );

        Self {
            systems,
            total_average_flow,
            backup,
            pool,
        }
    }
}
