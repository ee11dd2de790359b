//! Foam concentrate consumption per system
//!
//! Foam concentrate is injected at a fixed 0.25% of each system's average
//! solution flow, so a system's foam tank drains at `average_flow × 0.0025`.

use crate::core_types::runtime::Runtime;
use crate::core_types::units::{Gallons, GallonsPerMinute};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of solution flow that is foam concentrate (0.25%)
pub const FOAM_MIX_RATIO: f64 = 0.0025;

/// Foam tank sizes offered for a system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FoamTankSize {
    /// No foam tank installed
    NoFoam,
    Gal25,
    /// Standard tank
    #[default]
    Gal50,
    Gal100,
    Gal150,
}

impl FoamTankSize {
    /// Every selectable size, smallest first
    pub const ALL: [FoamTankSize; 5] = [
        Self::NoFoam,
        Self::Gal25,
        Self::Gal50,
        Self::Gal100,
        Self::Gal150,
    ];

    /// Look up a size by its capacity in whole gallons
    #[must_use]
    pub fn from_gallons(gallons: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.as_u32() == gallons)
    }

    /// Capacity in whole gallons
    #[must_use]
    pub fn as_u32(self) -> u32 {
        match self {
            Self::NoFoam => 0,
            Self::Gal25 => 25,
            Self::Gal50 => 50,
            Self::Gal100 => 100,
            Self::Gal150 => 150,
        }
    }

    #[must_use]
    pub fn gallons(self) -> Gallons {
        Gallons::new(f64::from(self.as_u32()))
    }

    /// True for the standard 50 gal tank
    #[must_use]
    pub fn is_standard(self) -> bool {
        self == Self::default()
    }
}

impl TryFrom<u32> for FoamTankSize {
    type Error = ConfigError;

    fn try_from(gallons: u32) -> Result<Self, Self::Error> {
        Self::from_gallons(gallons).ok_or(ConfigError::UnsupportedFoamTank(gallons))
    }
}

impl From<FoamTankSize> for u32 {
    fn from(size: FoamTankSize) -> u32 {
        size.as_u32()
    }
}

impl fmt::Display for FoamTankSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFoam => f.write_str("No foam"),
            size if size.is_standard() => write!(f, "{} gal (std)", size.as_u32()),
            size => write!(f, "{} gal", size.as_u32()),
        }
    }
}

/// Foam consumption and depletion for one system
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoamRuntime {
    /// Concentrate drawn from the tank; zero when not applicable
    pub foam_use_rate: GallonsPerMinute,
    /// Time until the tank is empty
    pub depletion: Runtime,
}

impl FoamRuntime {
    const NOT_APPLICABLE: FoamRuntime = FoamRuntime {
        foam_use_rate: GallonsPerMinute::ZERO,
        depletion: Runtime::NotApplicable,
    };
}

/// Estimate how long a foam tank lasts at a system's average flow
///
/// Both inputs are sanitized. An empty tank or an idle system yields
/// [`Runtime::NotApplicable`].
///
/// # Example
/// ```
/// use backup_runtime_core::compute_foam_runtime;
///
/// let foam = compute_foam_runtime(400.0, 50.0);
/// assert_eq!(*foam.foam_use_rate, 1.0);
/// assert_eq!(foam.depletion.to_string(), "0h 50m");
/// ```
#[must_use]
pub fn compute_foam_runtime(
    average_flow: impl Into<f64>,
    tank_volume: impl Into<f64>,
) -> FoamRuntime {
    let average_flow = GallonsPerMinute::sanitized(average_flow.into());
    let tank = Gallons::sanitized(tank_volume.into());

    if tank.is_zero() || average_flow.is_zero() {
        return FoamRuntime::NOT_APPLICABLE;
    }

    let foam_use_rate = average_flow * FOAM_MIX_RATIO;
    if *foam_use_rate <= 0.0 {
        // Underflow on absurdly small flows
        return FoamRuntime::NOT_APPLICABLE;
    }

    FoamRuntime {
        foam_use_rate,
        depletion: Runtime::Finite(tank / foam_use_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::Minutes;

    #[test]
    fn test_reference_case() {
        let foam = compute_foam_runtime(400.0, 50.0);
        assert_eq!(*foam.foam_use_rate, 1.0);
        assert_eq!(foam.depletion, Runtime::Finite(Minutes::new(50.0)));
        assert_eq!(foam.depletion.to_string(), "0h 50m");
    }

    #[test]
    fn test_no_tank_or_no_flow_is_not_applicable() {
        for (flow, tank) in [(0.0, 50.0), (17.0, 0.0), (0.0, 0.0)] {
            let foam = compute_foam_runtime(flow, tank);
            assert!(foam.depletion.is_not_applicable(), "flow={flow} tank={tank}");
            assert!(foam.foam_use_rate.is_zero());
        }
    }

    #[test]
    fn test_garbage_inputs_are_sanitized() {
        assert!(compute_foam_runtime(f64::NAN, 50.0).depletion.is_not_applicable());
        assert!(compute_foam_runtime(-20.0, 50.0).depletion.is_not_applicable());
        assert!(compute_foam_runtime(20.0, f64::INFINITY).depletion.is_not_applicable());
    }

    #[test]
    fn test_typical_system() {
        // 6 zones at 20 GPM averages 600/35 GPM
        let foam = compute_foam_runtime(600.0 / 35.0, 50.0);
        let minutes = foam.depletion.minutes().unwrap();
        assert!((*minutes - 50.0 / (600.0 / 35.0 * 0.0025)).abs() < 1e-9);
        assert_eq!(foam.depletion.to_string(), "19h 27m");
    }

    #[test]
    fn test_accepts_unit_types() {
        let foam = compute_foam_runtime(
            GallonsPerMinute::new(400.0),
            FoamTankSize::Gal100.gallons(),
        );
        assert_eq!(foam.depletion.minutes(), Some(Minutes::new(100.0)));
    }

    #[test]
    fn test_tank_size_options() {
        assert_eq!(FoamTankSize::default(), FoamTankSize::Gal50);
        assert_eq!(FoamTankSize::from_gallons(150), Some(FoamTankSize::Gal150));
        assert_eq!(FoamTankSize::from_gallons(75), None);
        assert_eq!(
            FoamTankSize::try_from(30_u32),
            Err(ConfigError::UnsupportedFoamTank(30))
        );
    }

    #[test]
    fn test_tank_size_labels() {
        assert_eq!(FoamTankSize::NoFoam.to_string(), "No foam");
        assert_eq!(FoamTankSize::Gal50.to_string(), "50 gal (std)");
        assert_eq!(FoamTankSize::Gal100.to_string(), "100 gal");
    }
}
