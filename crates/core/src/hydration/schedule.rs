//! Zone counts and the break table that follows each zone sequence
//!
//! The maintenance hydration protocol runs every zone for 5 minutes in
//! sequence, then pauses for a break whose length depends only on how many
//! zones the system has:
//!
//! | Zones | 1  | 2  | 3  | 4  | 5  | 6 | 7 | 8 | 9 |
//! |-------|----|----|----|----|----|---|---|---|---|
//! | Break | 30 | 25 | 20 | 15 | 10 | 5 | 2 | 2 | 2 |

use crate::core_types::units::Minutes;
use crate::error::ScheduleError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Maximum zones a single system can sequence
pub const MAX_ZONES: u8 = 9;

/// Fixed run time for each zone (minutes)
pub const RUN_MINUTES_PER_ZONE: f64 = 5.0;

/// Break minutes of the standard maintenance hydration protocol
const MAINTENANCE_HYDRATION_BREAKS: [(u8, f64); MAX_ZONES as usize] = [
    (1, 30.0),
    (2, 25.0),
    (3, 20.0),
    (4, 15.0),
    (5, 10.0),
    (6, 5.0),
    (7, 2.0),
    (8, 2.0),
    (9, 2.0),
];

static MAINTENANCE_HYDRATION: LazyLock<BreakSchedule> = LazyLock::new(|| {
    BreakSchedule::new(MAINTENANCE_HYDRATION_BREAKS)
        .expect("built-in maintenance hydration table covers every zone count")
});

/// Number of zones in a system, always within `1..=MAX_ZONES`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct ZoneCount(u8);

impl ZoneCount {
    pub const MIN: ZoneCount = ZoneCount(1);
    pub const MAX: ZoneCount = ZoneCount(MAX_ZONES);

    /// Create from an exact count, `None` outside `1..=MAX_ZONES`
    #[must_use]
    pub fn new(zones: u8) -> Option<Self> {
        (1..=MAX_ZONES).contains(&zones).then_some(ZoneCount(zones))
    }

    /// Clamp an arbitrary user value into range (zero and negatives become 1)
    #[must_use]
    pub fn clamped(raw: i64) -> Self {
        ZoneCount(raw.clamp(1, i64::from(MAX_ZONES)) as u8)
    }

    #[inline]
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Count as a slice length
    #[inline]
    #[must_use]
    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }

    /// Iterate over every supported zone count in ascending order
    pub fn all() -> impl Iterator<Item = ZoneCount> {
        (1..=MAX_ZONES).map(ZoneCount)
    }
}

impl Default for ZoneCount {
    fn default() -> Self {
        ZoneCount(6)
    }
}

impl From<i64> for ZoneCount {
    fn from(raw: i64) -> Self {
        ZoneCount::clamped(raw)
    }
}

impl From<ZoneCount> for u8 {
    fn from(zones: ZoneCount) -> u8 {
        zones.0
    }
}

impl fmt::Display for ZoneCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable zone count → break length table
///
/// Construction validates that every zone count in `1..=MAX_ZONES` has exactly
/// one finite, non-negative entry, so lookups through [`ZoneCount`] are total.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakSchedule {
    breaks: FxHashMap<u8, Minutes>,
}

impl BreakSchedule {
    /// Build a schedule from `(zone count, break minutes)` entries
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] if an entry is keyed outside `1..=MAX_ZONES`,
    /// a key repeats, a key is missing, or a break length is negative or
    /// non-finite.
    pub fn new(entries: impl IntoIterator<Item = (u8, f64)>) -> Result<Self, ScheduleError> {
        let mut breaks = FxHashMap::default();

        for (zones, minutes) in entries {
            if ZoneCount::new(zones).is_none() {
                return Err(ScheduleError::ZoneOutOfRange {
                    zones,
                    max: MAX_ZONES,
                });
            }
            if !minutes.is_finite() || minutes < 0.0 {
                return Err(ScheduleError::InvalidMinutes { zones, minutes });
            }
            if breaks.insert(zones, Minutes::new(minutes)).is_some() {
                return Err(ScheduleError::DuplicateZone(zones));
            }
        }

        if let Some(missing) = ZoneCount::all().find(|z| !breaks.contains_key(&z.get())) {
            return Err(ScheduleError::MissingZone(missing.get()));
        }

        Ok(Self { breaks })
    }

    /// The standard maintenance hydration schedule
    #[must_use]
    pub fn maintenance_hydration() -> &'static BreakSchedule {
        &MAINTENANCE_HYDRATION
    }

    /// Break length after a full sequence of `zones`
    #[must_use]
    pub fn break_minutes(&self, zones: ZoneCount) -> Minutes {
        self.breaks[&zones.get()]
    }

    /// Break length for a raw key, `None` outside `1..=MAX_ZONES`
    #[must_use]
    pub fn try_break_minutes(&self, zones: u8) -> Option<Minutes> {
        self.breaks.get(&zones).copied()
    }
}
