//! Pool / tank volume estimate from dimensions
//!
//! Uses the average-depth method: the floor is assumed to slope evenly from
//! the shallow end to the deep end, so volume is the surface area times the
//! mean of the two depths.

use crate::core_types::units::{Feet, Gallons};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// US gallons per cubic foot
pub const GALLONS_PER_CUBIC_FOOT: f64 = 7.48;

/// Plan-view shape of the reservoir
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolShape {
    #[default]
    #[serde(alias = "rect")]
    Rectangle,
    Circle,
}

/// Surface dimensions for each shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum PoolDimensions {
    Rectangle { length: Feet, width: Feet },
    Circle { diameter: Feet },
}

impl PoolDimensions {
    /// Rectangle from untrusted input
    #[must_use]
    pub fn rectangle(length: f64, width: f64) -> Self {
        Self::Rectangle {
            length: Feet::sanitized(length),
            width: Feet::sanitized(width),
        }
    }

    /// Circle from untrusted input
    #[must_use]
    pub fn circle(diameter: f64) -> Self {
        Self::Circle {
            diameter: Feet::sanitized(diameter),
        }
    }

    #[must_use]
    pub fn shape(&self) -> PoolShape {
        match self {
            Self::Rectangle { .. } => PoolShape::Rectangle,
            Self::Circle { .. } => PoolShape::Circle,
        }
    }

    /// Surface area in square feet, `None` if any dimension is zero
    #[must_use]
    pub fn surface_area(&self) -> Option<f64> {
        match *self {
            Self::Rectangle { length, width } if length.is_positive() && width.is_positive() => {
                Some(length.value() * width.value())
            }
            Self::Circle { diameter } if diameter.is_positive() => {
                let radius = diameter.value() / 2.0;
                Some(PI * radius * radius)
            }
            Self::Rectangle { .. } | Self::Circle { .. } => None,
        }
    }
}

/// Advisory volume estimate for a pool or tank
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoolVolumeEstimate {
    pub shape: PoolShape,
    pub dimensions: PoolDimensions,
    pub average_depth: Feet,
    /// Rounded to whole gallons; zero when any input is missing
    pub estimated_volume: Gallons,
}

/// Estimate reservoir volume from its dimensions and end depths
///
/// Depths are sanitized. A zero average depth, or any zero surface
/// dimension, gives an estimate of 0.
///
/// # Example
/// ```
/// use backup_runtime_core::{estimate_volume, PoolDimensions};
///
/// let pool = estimate_volume(PoolDimensions::rectangle(30.0, 15.0), 3.5, 6.0);
/// assert_eq!(*pool.average_depth, 4.75);
/// assert_eq!(*pool.estimated_volume, 15989.0);
/// ```
#[must_use]
pub fn estimate_volume(
    dimensions: PoolDimensions,
    shallow_depth: f64,
    deep_depth: f64,
) -> PoolVolumeEstimate {
    let shallow = Feet::sanitized(shallow_depth);
    let deep = Feet::sanitized(deep_depth);
    let average_depth = Feet::sanitized(f64::midpoint(shallow.value(), deep.value()));

    let estimated_volume = if average_depth.is_positive() {
        dimensions.surface_area().map_or(Gallons::ZERO, |area| {
            Gallons::sanitized((area * average_depth.value() * GALLONS_PER_CUBIC_FOOT).round())
        })
    } else {
        Gallons::ZERO
    };

    PoolVolumeEstimate {
        shape: dimensions.shape(),
        dimensions,
        average_depth,
        estimated_volume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_reference_pool() {
        let pool = estimate_volume(PoolDimensions::rectangle(30.0, 15.0), 3.5, 6.0);
        assert_eq!(pool.shape, PoolShape::Rectangle);
        assert_eq!(*pool.average_depth, 4.75);
        // 30 × 15 × 4.75 × 7.48 = 15988.5
        assert_eq!(*pool.estimated_volume, 15989.0);
    }

    #[test]
    fn test_circle_pool() {
        let pool = estimate_volume(PoolDimensions::circle(20.0), 3.5, 6.0);
        assert_eq!(pool.shape, PoolShape::Circle);
        // π × 10² × 4.75 × 7.48 ≈ 11162.3
        assert_eq!(*pool.estimated_volume, 11162.0);
    }

    #[test]
    fn test_zero_diameter_is_zero_regardless_of_depth() {
        for (shallow, deep) in [(3.5, 6.0), (10.0, 12.0), (0.0, 0.0)] {
            let pool = estimate_volume(PoolDimensions::circle(0.0), shallow, deep);
            assert!(pool.estimated_volume.is_zero());
        }
    }

    #[test]
    fn test_missing_side_is_zero() {
        assert!(estimate_volume(PoolDimensions::rectangle(30.0, 0.0), 3.5, 6.0)
            .estimated_volume
            .is_zero());
        assert!(estimate_volume(PoolDimensions::rectangle(-30.0, 15.0), 3.5, 6.0)
            .estimated_volume
            .is_zero());
    }

    #[test]
    fn test_zero_depth_is_zero() {
        let pool = estimate_volume(PoolDimensions::rectangle(30.0, 15.0), 0.0, 0.0);
        assert!(pool.estimated_volume.is_zero());
        let pool = estimate_volume(PoolDimensions::rectangle(30.0, 15.0), f64::NAN, -2.0);
        assert!(pool.estimated_volume.is_zero());
    }

    #[test]
    fn test_single_depth_is_halved() {
        // A missing shallow depth still averages with zero
        let pool = estimate_volume(PoolDimensions::rectangle(10.0, 10.0), 0.0, 4.0);
        assert_eq!(*pool.average_depth, 2.0);
        assert_eq!(*pool.estimated_volume, 1496.0);
    }

    #[test]
    fn test_shape_parses_short_name() {
        let shape: PoolShape = serde_json::from_str("\"rect\"").unwrap();
        assert_eq!(shape, PoolShape::Rectangle);
        let shape: PoolShape = serde_json::from_str("\"circle\"").unwrap();
        assert_eq!(shape, PoolShape::Circle);
    }
}
