//! Semantic unit types for the quantities the calculator works with
//!
//! Newtype wrappers keep gallons, flow rates, durations and lengths from being
//! mixed up by accident (e.g. passing a tank volume where a flow rate is
//! expected).
//!
//! # Design Philosophy
//! - All quantities use f64; inputs arrive as arbitrary user-entered numbers
//! - Private inner fields; `new` asserts validity, `sanitized` coerces
//! - Sanitizing maps non-finite and negative values to zero, matching the
//!   permissive policy of the input boundary
//! - Total ordering via `Ord` (NaN cannot be constructed through `sanitized`)
//! - Serde support, deserialization goes through `sanitized`
//!
//! # Usage
//! ```
//! use backup_runtime_core::core_types::units::{Gallons, GallonsPerMinute, Minutes};
//!
//! let tank = Gallons::new(50.0);
//! let draw = GallonsPerMinute::new(1.0);
//! let minutes: Minutes = tank / draw;
//! assert_eq!(*minutes, 50.0);
//!
//! // Garbage input collapses to zero instead of failing
//! assert_eq!(*GallonsPerMinute::sanitized(f64::NAN), 0.0);
//! assert_eq!(*Gallons::sanitized(-12.0), 0.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Deref, Div, Mul};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Coerce a raw input value to a finite, non-negative number.
///
/// NaN, infinities and negative values all become `0.0`.
#[inline]
#[must_use]
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Group the digits of a whole number with commas (`15982` → `"15,982"`).
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// ============================================================================
// VOLUME TYPES
// ============================================================================

/// Volume in US gallons
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
#[repr(transparent)]
pub struct Gallons(f64);

impl Eq for Gallons {}

impl PartialOrd for Gallons {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Gallons {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Gallons {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Gallons {
    /// Empty volume
    pub const ZERO: Gallons = Gallons(0.0);

    /// Create a new volume. Asserts the value is non-negative.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Gallons::new: negative volume is invalid");
        Gallons(value)
    }

    /// Create from untrusted input, coercing invalid values to zero
    #[inline]
    #[must_use]
    pub fn sanitized(value: f64) -> Self {
        Gallons(sanitize(value))
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// True when no volume is present
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for Gallons {
    fn from(v: f64) -> Self {
        Gallons::sanitized(v)
    }
}

impl From<Gallons> for f64 {
    fn from(g: Gallons) -> f64 {
        g.0
    }
}

impl Add for Gallons {
    type Output = Gallons;
    fn add(self, rhs: Gallons) -> Gallons {
        Gallons(self.0 + rhs.0)
    }
}

// Cross-type operation: volume / flow = time
impl Div<GallonsPerMinute> for Gallons {
    type Output = Minutes;
    fn div(self, rhs: GallonsPerMinute) -> Minutes {
        Minutes(self.0 / rhs.0)
    }
}

// Cross-type operation: volume / time = flow
impl Div<Minutes> for Gallons {
    type Output = GallonsPerMinute;
    fn div(self, rhs: Minutes) -> GallonsPerMinute {
        GallonsPerMinute(self.0 / rhs.0)
    }
}

impl fmt::Display for Gallons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Overflowed arithmetic must not saturate into a plausible number
        if self.0.is_finite() {
            write!(f, "{} gal", group_thousands(self.0.round() as u64))
        } else {
            write!(f, "{} gal", self.0)
        }
    }
}

// ============================================================================
// FLOW TYPES
// ============================================================================

/// Flow rate in US gallons per minute (GPM)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
#[repr(transparent)]
pub struct GallonsPerMinute(f64);

impl Eq for GallonsPerMinute {}

impl PartialOrd for GallonsPerMinute {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GallonsPerMinute {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for GallonsPerMinute {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl GallonsPerMinute {
    /// No flow
    pub const ZERO: GallonsPerMinute = GallonsPerMinute(0.0);

    /// Create a new flow rate. Asserts the value is non-negative.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "GallonsPerMinute::new: negative flow rate is invalid"
        );
        GallonsPerMinute(value)
    }

    /// Create from untrusted input, coercing invalid values to zero
    #[inline]
    #[must_use]
    pub fn sanitized(value: f64) -> Self {
        GallonsPerMinute(sanitize(value))
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// True when nothing is flowing
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for GallonsPerMinute {
    fn from(v: f64) -> Self {
        GallonsPerMinute::sanitized(v)
    }
}

impl From<GallonsPerMinute> for f64 {
    fn from(q: GallonsPerMinute) -> f64 {
        q.0
    }
}

impl Add for GallonsPerMinute {
    type Output = GallonsPerMinute;
    fn add(self, rhs: GallonsPerMinute) -> GallonsPerMinute {
        GallonsPerMinute(self.0 + rhs.0)
    }
}

impl Sum for GallonsPerMinute {
    fn sum<I: Iterator<Item = GallonsPerMinute>>(iter: I) -> Self {
        iter.fold(GallonsPerMinute::ZERO, Add::add)
    }
}

impl Mul<f64> for GallonsPerMinute {
    type Output = GallonsPerMinute;
    fn mul(self, rhs: f64) -> GallonsPerMinute {
        GallonsPerMinute(self.0 * rhs)
    }
}

// Cross-type operation: flow × time = volume
impl Mul<Minutes> for GallonsPerMinute {
    type Output = Gallons;
    fn mul(self, rhs: Minutes) -> Gallons {
        Gallons(self.0 * rhs.0)
    }
}

impl fmt::Display for GallonsPerMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*} GPM", precision, self.0),
            None => write!(f, "{:.2} GPM", self.0),
        }
    }
}

// ============================================================================
// TIME TYPES
// ============================================================================

/// Duration in minutes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
#[repr(transparent)]
pub struct Minutes(f64);

impl Eq for Minutes {}

impl PartialOrd for Minutes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Minutes {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Minutes {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Minutes {
    /// Zero-length duration
    pub const ZERO: Minutes = Minutes(0.0);

    /// Create a new duration. Asserts the value is non-negative.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Minutes::new: negative duration is invalid");
        Minutes(value)
    }

    /// Create from untrusted input, coercing invalid values to zero
    #[inline]
    #[must_use]
    pub fn sanitized(value: f64) -> Self {
        Minutes(sanitize(value))
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

}

impl From<f64> for Minutes {
    fn from(v: f64) -> Self {
        Minutes::sanitized(v)
    }
}

impl From<Minutes> for f64 {
    fn from(m: Minutes) -> f64 {
        m.0
    }
}

impl Add for Minutes {
    type Output = Minutes;
    fn add(self, rhs: Minutes) -> Minutes {
        Minutes(self.0 + rhs.0)
    }
}

impl Mul<f64> for Minutes {
    type Output = Minutes;
    fn mul(self, rhs: f64) -> Minutes {
        Minutes(self.0 * rhs)
    }
}

// Ratio of two durations (dimensionless)
impl Div for Minutes {
    type Output = f64;
    fn div(self, rhs: Minutes) -> f64 {
        self.0 / rhs.0
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

// ============================================================================
// LENGTH TYPES
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
#[repr(transparent)]
pub struct Feet(f64);

impl Eq for Feet {}

impl PartialOrd for Feet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Feet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Feet {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Feet {
    /// Create a new length. Asserts the value is non-negative.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Feet::new: negative length is invalid");
        Feet(value)
    }

    /// Create from untrusted input, coercing invalid values to zero
    #[inline]
    #[must_use]
    pub fn sanitized(value: f64) -> Self {
        Feet(sanitize(value))
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// True when the length is strictly positive
    #[inline]
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}

impl From<f64> for Feet {
    fn from(v: f64) -> Self {
        Feet::sanitized(v)
    }
}

impl From<Feet> for f64 {
    fn from(l: Feet) -> f64 {
        l.0
    }
}

impl fmt::Display for Feet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ft", self.0)
    }
}

// ============================================================================
// DIMENSIONLESS TYPES
// ============================================================================

/// Fraction in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
#[repr(transparent)]
pub struct Fraction(f64);

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Fraction {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Fraction {
    /// Create a new fraction. Asserts the value lies in [0, 1].
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&value),
            "Fraction::new: value not in [0, 1]"
        );
        Fraction(value)
    }

    /// Create from an arbitrary ratio, clamping into [0, 1] (NaN → 0)
    #[inline]
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        Fraction(sanitize(value).min(1.0))
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Express as a percentage (0-100)
    #[inline]
    #[must_use]
    pub fn to_percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl From<f64> for Fraction {
    fn from(v: f64) -> Self {
        Fraction::clamped(v)
    }
}

impl From<Fraction> for f64 {
    fn from(p: Fraction) -> f64 {
        p.0
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.to_percent())
    }
}
