//! Calculator configuration record
//!
//! [`CalculatorConfig`] is the single source of truth a presentation layer
//! keeps: five system slots, how many of them are active, the backup water
//! source, and the pool/tank helper inputs. Every update operation sanitizes
//! its input, and all derived values are recomputed from the record with
//! [`RuntimeSummary::derive`](crate::RuntimeSummary::derive).
//!
//! Scenarios can be loaded from JSON; any field left out takes its default.
//!
//! ```
//! use backup_runtime_core::CalculatorConfig;
//!
//! let config: CalculatorConfig = serde_json::from_str(r#"{
//!     "active_system_count": 2,
//!     "systems": [{ "zone_count": 4, "foam_tank": 100 }],
//!     "backup_source": { "volume": 12000 }
//! }"#).unwrap();
//!
//! assert_eq!(config.active_systems().len(), 2);
//! assert_eq!(config.systems()[0].zone_count().get(), 4);
//! assert_eq!(config.systems()[1].zone_count().get(), 6);
//! assert_eq!(*config.backup_source().refill_rate, 0.0);
//! ```

use crate::core_types::units::{Feet, Gallons, GallonsPerMinute};
use crate::error::ConfigError;
use crate::hydration::{BreakSchedule, ZoneCount, ZoneCycleStats, MAX_ZONES};
use crate::supply::{
    compute_foam_runtime, estimate_volume, FoamRuntime, FoamTankSize, PoolDimensions, PoolShape,
    PoolVolumeEstimate,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

/// Maximum systems sharing one backup source
pub const MAX_SYSTEMS: usize = 5;

/// Flow every zone starts with
pub const DEFAULT_ZONE_FLOW_GPM: f64 = 20.0;

/// Default backup source volume
pub const DEFAULT_SOURCE_GALLONS: f64 = 20000.0;

// ============================================================================
// SYSTEM
// ============================================================================

/// One zoned system: zone count, per-zone flows, and its foam tank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    zone_count: ZoneCount,
    #[serde(deserialize_with = "deserialize_zone_flows")]
    zone_flows: Vec<GallonsPerMinute>,
    foam_tank: FoamTankSize,
}

/// Pad or truncate loaded flows to exactly nine slots; missing slots are 0
fn deserialize_zone_flows<'de, D>(deserializer: D) -> Result<Vec<GallonsPerMinute>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut flows = Vec::<GallonsPerMinute>::deserialize(deserializer)?;
    flows.resize(usize::from(MAX_ZONES), GallonsPerMinute::ZERO);
    Ok(flows)
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            zone_count: ZoneCount::default(),
            zone_flows: vec![GallonsPerMinute::new(DEFAULT_ZONE_FLOW_GPM); usize::from(MAX_ZONES)],
            foam_tank: FoamTankSize::default(),
        }
    }
}

impl SystemConfig {
    /// Create a system from raw inputs
    ///
    /// `zone_count` is clamped to `1..=9` and flows are sanitized. At most
    /// nine flows are kept; missing slots are 0.
    #[must_use]
    pub fn new(zone_count: i64, flows: &[f64], foam_tank: FoamTankSize) -> Self {
        let zone_flows = (0..usize::from(MAX_ZONES))
            .map(|i| GallonsPerMinute::sanitized(flows.get(i).copied().unwrap_or(0.0)))
            .collect();
        Self {
            zone_count: ZoneCount::clamped(zone_count),
            zone_flows,
            foam_tank,
        }
    }

    #[must_use]
    pub fn zone_count(&self) -> ZoneCount {
        self.zone_count
    }

    /// Stored flows for every slot, including zones beyond `zone_count`
    #[must_use]
    pub fn zone_flows(&self) -> &[GallonsPerMinute] {
        &self.zone_flows
    }

    #[must_use]
    pub fn foam_tank(&self) -> FoamTankSize {
        self.foam_tank
    }

    /// Set the zone count, clamping into `1..=9`
    pub fn set_zone_count(&mut self, zone_count: i64) {
        let zones = ZoneCount::clamped(zone_count);
        if i64::from(zones.get()) != zone_count {
            debug!(
                requested = zone_count,
                applied = zones.get(),
                "zone count clamped"
            );
        }
        self.zone_count = zones;
    }

    /// Set one zone's flow; invalid values are stored as 0
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZoneIndexOutOfRange`] if `zone` is not below 9.
    pub fn set_zone_flow(&mut self, zone: usize, gpm: f64) -> Result<(), ConfigError> {
        let max = usize::from(MAX_ZONES);
        if zone >= max {
            return Err(ConfigError::ZoneIndexOutOfRange { index: zone, max });
        }
        self.zone_flows[zone] = GallonsPerMinute::sanitized(gpm);
        Ok(())
    }

    /// Set all nine zone slots to the same flow
    ///
    /// Every slot is written, not only the first `zone_count`, so raising the
    /// zone count later picks up the same flow.
    pub fn set_all_zone_flows(&mut self, gpm: f64) {
        self.zone_flows = vec![GallonsPerMinute::sanitized(gpm); usize::from(MAX_ZONES)];
    }

    pub fn set_foam_tank(&mut self, foam_tank: FoamTankSize) {
        self.foam_tank = foam_tank;
    }

    /// Cycle statistics under the standard maintenance hydration schedule
    #[must_use]
    pub fn zone_cycle(&self) -> ZoneCycleStats {
        self.zone_cycle_with(BreakSchedule::maintenance_hydration())
    }

    /// Cycle statistics under a custom break schedule
    #[must_use]
    pub fn zone_cycle_with(&self, schedule: &BreakSchedule) -> ZoneCycleStats {
        let flows: Vec<f64> = self.zone_flows.iter().map(|q| q.value()).collect();
        schedule.zone_cycle(self.zone_count, &flows)
    }

    /// Foam runtime for this system's tank at the given cycle's average flow
    #[must_use]
    pub fn foam_runtime(&self, stats: &ZoneCycleStats) -> FoamRuntime {
        compute_foam_runtime(stats.average_flow, self.foam_tank.gallons())
    }
}

// ============================================================================
// BACKUP SOURCE
// ============================================================================

/// Shared backup water source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupSourceConfig {
    pub volume: Gallons,
    pub refill_rate: GallonsPerMinute,
}

impl Default for BackupSourceConfig {
    fn default() -> Self {
        Self {
            volume: Gallons::new(DEFAULT_SOURCE_GALLONS),
            refill_rate: GallonsPerMinute::ZERO,
        }
    }
}

// ============================================================================
// POOL / TANK HELPER
// ============================================================================

/// Dimensional inputs for the volume helper
///
/// Both the rectangle and circle dimensions are kept so switching shape does
/// not lose what was entered for the other one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolHelperConfig {
    pub shape: PoolShape,
    pub length: Feet,
    pub width: Feet,
    pub diameter: Feet,
    pub shallow_depth: Feet,
    pub deep_depth: Feet,
}

impl Default for PoolHelperConfig {
    fn default() -> Self {
        Self {
            shape: PoolShape::Rectangle,
            length: Feet::new(30.0),
            width: Feet::new(15.0),
            diameter: Feet::new(20.0),
            shallow_depth: Feet::new(3.5),
            deep_depth: Feet::new(6.0),
        }
    }
}

impl PoolHelperConfig {
    /// Dimensions for the currently selected shape
    #[must_use]
    pub fn dimensions(&self) -> PoolDimensions {
        match self.shape {
            PoolShape::Rectangle => PoolDimensions::Rectangle {
                length: self.length,
                width: self.width,
            },
            PoolShape::Circle => PoolDimensions::Circle {
                diameter: self.diameter,
            },
        }
    }

    #[must_use]
    pub fn estimate(&self) -> PoolVolumeEstimate {
        estimate_volume(
            self.dimensions(),
            self.shallow_depth.value(),
            self.deep_depth.value(),
        )
    }

    pub fn set_shape(&mut self, shape: PoolShape) {
        self.shape = shape;
    }

    pub fn set_length(&mut self, feet: f64) {
        self.length = Feet::sanitized(feet);
    }

    pub fn set_width(&mut self, feet: f64) {
        self.width = Feet::sanitized(feet);
    }

    pub fn set_diameter(&mut self, feet: f64) {
        self.diameter = Feet::sanitized(feet);
    }

    pub fn set_depths(&mut self, shallow: f64, deep: f64) {
        self.shallow_depth = Feet::sanitized(shallow);
        self.deep_depth = Feet::sanitized(deep);
    }
}

// ============================================================================
// CALCULATOR
// ============================================================================

/// Full calculator state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    #[serde(deserialize_with = "deserialize_systems")]
    systems: Vec<SystemConfig>,

    #[serde(deserialize_with = "deserialize_active_count")]
    active_system_count: usize,

    backup_source: BackupSourceConfig,

    pool_helper: PoolHelperConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            systems: vec![SystemConfig::default(); MAX_SYSTEMS],
            active_system_count: 1,
            backup_source: BackupSourceConfig::default(),
            pool_helper: PoolHelperConfig::default(),
        }
    }
}

fn clamp_active_count(raw: i64) -> usize {
    raw.clamp(1, MAX_SYSTEMS as i64) as usize
}

fn deserialize_systems<'de, D>(deserializer: D) -> Result<Vec<SystemConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut systems = Vec::<SystemConfig>::deserialize(deserializer)?;
    if systems.len() > MAX_SYSTEMS {
        return Err(D::Error::custom(ConfigError::TooManySystems {
            count: systems.len(),
            max: MAX_SYSTEMS,
        }));
    }
    systems.resize_with(MAX_SYSTEMS, SystemConfig::default);
    Ok(systems)
}

fn deserialize_active_count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_active_count)
}

impl CalculatorConfig {
    /// All five system slots, active or not
    #[must_use]
    pub fn systems(&self) -> &[SystemConfig] {
        &self.systems
    }

    /// The first `active_system_count` systems
    #[must_use]
    pub fn active_systems(&self) -> &[SystemConfig] {
        &self.systems[..self.active_system_count]
    }

    #[must_use]
    pub fn active_system_count(&self) -> usize {
        self.active_system_count
    }

    #[must_use]
    pub fn backup_source(&self) -> &BackupSourceConfig {
        &self.backup_source
    }

    #[must_use]
    pub fn pool_helper(&self) -> &PoolHelperConfig {
        &self.pool_helper
    }

    pub fn pool_helper_mut(&mut self) -> &mut PoolHelperConfig {
        &mut self.pool_helper
    }

    /// Look up a system slot
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SystemIndexOutOfRange`] if `index` is not below 5.
    pub fn system(&self, index: usize) -> Result<&SystemConfig, ConfigError> {
        self.systems
            .get(index)
            .ok_or(ConfigError::SystemIndexOutOfRange {
                index,
                max: MAX_SYSTEMS,
            })
    }

    /// Mutable access to a system slot
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SystemIndexOutOfRange`] if `index` is not below 5.
    pub fn system_mut(&mut self, index: usize) -> Result<&mut SystemConfig, ConfigError> {
        self.systems
            .get_mut(index)
            .ok_or(ConfigError::SystemIndexOutOfRange {
                index,
                max: MAX_SYSTEMS,
            })
    }

    /// Choose how many systems draw on the backup source, clamped to `1..=5`
    ///
    /// Inactive systems keep their settings.
    pub fn set_active_system_count(&mut self, count: i64) {
        self.active_system_count = clamp_active_count(count);
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::SystemIndexOutOfRange`] for an unknown system.
    pub fn set_zone_count(&mut self, system: usize, zone_count: i64) -> Result<(), ConfigError> {
        self.system_mut(system)?.set_zone_count(zone_count);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unknown system or zone slot.
    pub fn set_zone_flow(
        &mut self,
        system: usize,
        zone: usize,
        gpm: f64,
    ) -> Result<(), ConfigError> {
        self.system_mut(system)?.set_zone_flow(zone, gpm)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::SystemIndexOutOfRange`] for an unknown system.
    pub fn set_all_zone_flows(&mut self, system: usize, gpm: f64) -> Result<(), ConfigError> {
        self.system_mut(system)?.set_all_zone_flows(gpm);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::SystemIndexOutOfRange`] for an unknown system.
    pub fn set_foam_tank(
        &mut self,
        system: usize,
        foam_tank: FoamTankSize,
    ) -> Result<(), ConfigError> {
        self.system_mut(system)?.set_foam_tank(foam_tank);
        Ok(())
    }

    pub fn set_source_volume(&mut self, gallons: f64) {
        self.backup_source.volume = Gallons::sanitized(gallons);
    }

    pub fn set_refill_rate(&mut self, gpm: f64) {
        self.backup_source.refill_rate = GallonsPerMinute::sanitized(gpm);
    }

    /// Overwrite the backup source volume with the pool/tank estimate
    ///
    /// Nothing changes when the estimate is zero. Returns whether the volume
    /// was replaced.
    pub fn apply_pool_estimate(&mut self) -> bool {
        let estimate = self.pool_helper.estimate();
        if estimate.estimated_volume.is_zero() {
            warn!(
                shape = ?estimate.shape,
                "pool estimate is zero, backup source volume left unchanged"
            );
            return false;
        }

        debug!(
            previous = %self.backup_source.volume,
            applied = %estimate.estimated_volume,
            "backup source volume set from pool estimate"
        );
        self.backup_source.volume = estimate.estimated_volume;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.systems().len(), MAX_SYSTEMS);
        assert_eq!(config.active_system_count(), 1);
        assert_eq!(*config.backup_source().volume, 20000.0);
        assert!(config.backup_source().refill_rate.is_zero());

        let system = &config.systems()[0];
        assert_eq!(system.zone_count().get(), 6);
        assert_eq!(system.zone_flows().len(), 9);
        assert!(system.zone_flows().iter().all(|q| **q == 20.0));
        assert_eq!(system.foam_tank(), FoamTankSize::Gal50);

        let pool = config.pool_helper();
        assert_eq!(pool.shape, PoolShape::Rectangle);
        assert_eq!(*pool.diameter, 20.0);
    }

    #[test]
    fn test_active_count_is_clamped() {
        let mut config = CalculatorConfig::default();
        config.set_active_system_count(0);
        assert_eq!(config.active_system_count(), 1);
        config.set_active_system_count(9);
        assert_eq!(config.active_system_count(), 5);
        assert_eq!(config.active_systems().len(), 5);
    }

    #[test]
    fn test_zone_flow_updates_are_sanitized() {
        let mut config = CalculatorConfig::default();
        config.set_zone_flow(0, 2, -8.0).unwrap();
        config.set_zone_flow(0, 3, f64::NAN).unwrap();
        config.set_zone_flow(0, 4, 12.5).unwrap();

        let flows = config.systems()[0].zone_flows();
        assert!(flows[2].is_zero());
        assert!(flows[3].is_zero());
        assert_eq!(*flows[4], 12.5);
    }

    #[test]
    fn test_out_of_range_slots_are_errors() {
        let mut config = CalculatorConfig::default();
        assert_eq!(
            config.set_zone_flow(5, 0, 10.0),
            Err(ConfigError::SystemIndexOutOfRange { index: 5, max: 5 })
        );
        assert_eq!(
            config.set_zone_flow(0, 9, 10.0),
            Err(ConfigError::ZoneIndexOutOfRange { index: 9, max: 9 })
        );
        assert!(config.system(4).is_ok());
    }

    #[test]
    fn test_set_all_zones_fills_every_slot() {
        let mut config = CalculatorConfig::default();
        config.set_zone_count(1, 3).unwrap();
        config.set_all_zone_flows(1, 35.0).unwrap();

        let system = &config.systems()[1];
        assert_eq!(system.zone_flows().len(), 9);
        assert!(system.zone_flows().iter().all(|q| **q == 35.0));
        // Only the first three are consumed
        assert_eq!(system.zone_cycle().active_flows.len(), 3);
    }

    #[test]
    fn test_apply_pool_estimate() {
        let mut config = CalculatorConfig::default();
        assert!(config.apply_pool_estimate());
        assert_eq!(*config.backup_source().volume, 15989.0);

        config.pool_helper_mut().set_shape(PoolShape::Circle);
        config.pool_helper_mut().set_diameter(0.0);
        assert!(!config.apply_pool_estimate());
        assert_eq!(*config.backup_source().volume, 15989.0);
    }

    #[test]
    fn test_short_flow_list_is_padded() {
        let system = SystemConfig::new(4, &[10.0, 20.0], FoamTankSize::NoFoam);
        assert_eq!(system.zone_flows().len(), 9);
        assert_eq!(*system.zone_cycle().total_volume_per_cycle, 150.0);
    }

    #[test]
    fn test_short_deserialized_flows_are_padded() {
        let mut system: SystemConfig =
            serde_json::from_str(r#"{ "zone_count": 2, "zone_flows": [15.0] }"#).unwrap();
        assert_eq!(system.zone_flows().len(), 9);
        assert_eq!(*system.zone_flows()[0], 15.0);
        assert!(system.zone_flows()[1..].iter().all(|q| q.is_zero()));

        system.set_zone_flow(8, 5.0).unwrap();
        assert_eq!(*system.zone_flows()[8], 5.0);
    }

    #[test]
    fn test_long_deserialized_flows_are_truncated() {
        let json = r#"{ "zone_flows": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11] }"#;
        let system: SystemConfig = serde_json::from_str(json).unwrap();
        assert_eq!(system.zone_flows().len(), 9);
        assert_eq!(*system.zone_flows()[8], 9.0);
    }

    #[test]
    fn test_scenario_rejects_too_many_systems() {
        let json = r#"{ "systems": [{}, {}, {}, {}, {}, {}] }"#;
        let err = serde_json::from_str::<CalculatorConfig>(json).unwrap_err();
        assert!(err.to_string().contains("at most 5"), "{err}");
    }

    #[test]
    fn test_scenario_rejects_unknown_foam_tank() {
        let json = r#"{ "systems": [{ "foam_tank": 75 }] }"#;
        let err = serde_json::from_str::<CalculatorConfig>(json).unwrap_err();
        assert!(err.to_string().contains("75 gal"), "{err}");
    }
}
