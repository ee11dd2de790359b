//! Plain-text rendering of a runtime summary

use backup_runtime_core::{
    CalculatorConfig, FoamTankSize, PoolDimensions, Runtime, RuntimeSummary, SystemSummary,
};
use std::fmt;

/// Human-readable report for a configuration and its derived summary
pub struct TextReport<'a> {
    pub config: &'a CalculatorConfig,
    pub summary: &'a RuntimeSummary,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;
        let source = self.config.backup_source();

        writeln!(f, "=== Backup Water & Foam Runtime ===")?;
        writeln!(f)?;
        writeln!(f, "Backup source:     {}", source.volume)?;
        writeln!(f, "Refill:            {}", source.refill_rate)?;
        writeln!(
            f,
            "Total avg demand:  {} (sum of {} system(s))",
            summary.backup.total_average_flow,
            summary.systems.len()
        )?;
        writeln!(f, "Net draw:          {:.2} GPM", summary.backup.net_draw)?;
        writeln!(f, "Backup runtime:    {}", summary.backup.runtime)?;
        if summary.backup.runtime.is_not_applicable() {
            writeln!(f, "  (needs a source volume and a flowing zone)")?;
        }

        for system in &summary.systems {
            writeln!(f)?;
            write_system(f, system)?;
        }

        let pool = &summary.pool;
        writeln!(f)?;
        match pool.dimensions {
            PoolDimensions::Rectangle { length, width } => writeln!(
                f,
                "Pool / tank helper: rectangle {length} x {width}, avg depth {}",
                pool.average_depth
            )?,
            PoolDimensions::Circle { diameter } => writeln!(
                f,
                "Pool / tank helper: circle {diameter} across, avg depth {}",
                pool.average_depth
            )?,
        }
        if pool.estimated_volume.is_zero() {
            writeln!(f, "  Estimated volume: 0 gal (missing dimensions)")
        } else {
            writeln!(f, "  Estimated volume: {}", pool.estimated_volume)
        }
    }
}

fn write_system(f: &mut fmt::Formatter<'_>, system: &SystemSummary) -> fmt::Result {
    let stats = &system.stats;
    let number = system.index + 1;

    writeln!(
        f,
        "System {number} - {} zones · Avg {} · Duty {}",
        stats.zone_count, stats.average_flow, stats.duty_cycle
    )?;

    let zones: Vec<String> = stats
        .active_flows
        .iter()
        .enumerate()
        .map(|(zone, flow)| format!("S{number}-Z{} {:.2}", zone + 1, **flow))
        .collect();
    writeln!(f, "  Zone GPM: {}", zones.join(", "))?;
    writeln!(
        f,
        "  Run: {} · Break: {} · Cycle: {} · Volume/cycle: {}",
        stats.total_run_minutes,
        stats.break_minutes,
        stats.cycle_minutes,
        stats.total_volume_per_cycle
    )?;

    match (system.foam_tank, system.foam.depletion) {
        (FoamTankSize::NoFoam, _) => writeln!(f, "  Foam: No foam configured"),
        (tank, Runtime::Finite(_)) => writeln!(
            f,
            "  Foam: tank {tank} · use {:.3} · runtime {}",
            system.foam.foam_use_rate, system.foam.depletion
        ),
        (tank, depletion) => writeln!(f, "  Foam: tank {tank} · runtime {depletion}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(config: &CalculatorConfig) -> String {
        let summary = RuntimeSummary::derive(config);
        TextReport {
            config,
            summary: &summary,
        }
        .to_string()
    }

    #[test]
    fn test_default_report() {
        let text = render(&CalculatorConfig::default());

        assert!(text.contains("Backup source:     20,000 gal"), "{text}");
        assert!(text.contains("Total avg demand:  17.14 GPM (sum of 1 system(s))"));
        assert!(text.contains("Backup runtime:    19h 27m"));
        assert!(text.contains("System 1 - 6 zones · Avg 17.14 GPM · Duty 85.7%"));
        assert!(text.contains("S1-Z6 20.00"));
        assert!(!text.contains("S1-Z7"));
        assert!(text.contains("Break: 5 min · Cycle: 35 min · Volume/cycle: 600 gal"));
        assert!(text.contains("Foam: tank 50 gal (std) · use 0.043 GPM · runtime 19h 27m"));
        assert!(text.contains("Estimated volume: 15,989 gal"));
    }

    #[test]
    fn test_sentinels_render_distinctly() {
        let mut config = CalculatorConfig::default();
        config.set_refill_rate(50.0);
        config.set_foam_tank(0, FoamTankSize::NoFoam).unwrap();
        let text = render(&config);
        assert!(text.contains("Backup runtime:    Unlimited (refill ≥ total demand)"));
        assert!(text.contains("Foam: No foam configured"));

        config.set_all_zone_flows(0, 0.0).unwrap();
        let text = render(&config);
        assert!(text.contains("Backup runtime:    N/A"));
        assert!(text.contains("needs a source volume"));
    }

    #[test]
    fn test_overflowing_flows_render_consistently() {
        let mut config = CalculatorConfig::default();
        config.set_all_zone_flows(0, f64::MAX).unwrap();
        let text = render(&config);

        assert!(text.contains("Total avg demand:  0.00 GPM"), "{text}");
        assert!(text.contains("Backup runtime:    N/A"));
        assert!(text.contains("Volume/cycle: inf gal"));
        assert!(!text.contains("18,446,744"));
    }
}
