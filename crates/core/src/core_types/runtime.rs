//! Runtime outcomes shared by the foam and backup-source estimators

use super::units::Minutes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a depletion calculation
///
/// Estimators never fail; when a numeric duration makes no sense they report
/// one of the sentinel variants instead, and the presentation layer must
/// render those distinctly from a duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "minutes", rename_all = "snake_case")]
pub enum Runtime {
    /// Supply runs out after this many minutes
    Finite(Minutes),
    /// Refill keeps pace with (or exceeds) demand; the supply never runs out
    Unlimited,
    /// Not enough configuration to compute a meaningful runtime
    NotApplicable,
}

impl Runtime {
    /// Minutes until depletion, if finite
    #[must_use]
    pub fn minutes(&self) -> Option<Minutes> {
        match self {
            Self::Finite(minutes) => Some(*minutes),
            Self::Unlimited | Self::NotApplicable => None,
        }
    }

    /// Whole hours plus rounded remainder minutes, if finite
    #[must_use]
    pub fn hours_minutes(&self) -> Option<HoursMinutes> {
        self.minutes().map(HoursMinutes::from_minutes)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    #[must_use]
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable)
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(minutes) => fmt::Display::fmt(&HoursMinutes::from_minutes(*minutes), f),
            Self::Unlimited => f.write_str("Unlimited (refill ≥ total demand)"),
            Self::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// A duration split for display as `"{hours}h {minutes}m"`
///
/// `hours = floor(total / 60)` and `minutes = round(total - hours * 60)`.
/// The remainder is rounded independently of the hours, so a total of
/// 59.6 minutes displays as `0h 60m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoursMinutes {
    pub hours: u64,
    pub minutes: u64,
}

impl HoursMinutes {
    #[must_use]
    pub fn from_minutes(total: Minutes) -> Self {
        let hours = (total.value() / 60.0).floor();
        let minutes = (total.value() - hours * 60.0).round();
        Self {
            hours: hours as u64,
            minutes: minutes as u64,
        }
    }
}

impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}
