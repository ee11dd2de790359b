//! Backup Water & Foam Runtime Core Library
//!
//! Estimates how long zoned maintenance hydration systems can keep running
//! from a finite backup water source, and how long each system's foam
//! concentrate tank lasts.
//!
//! ## Components
//!
//! - **Zone cycle**: zones run 5 minutes each in sequence, then break for a
//!   time set by the zone count; yields duty cycle and time-weighted average flow
//! - **Foam runtime**: concentrate drawn at a fixed 0.25% of average flow
//! - **Backup source**: combined average demand minus refill against the
//!   reservoir volume
//! - **Volume helper**: pool/tank gallons from dimensions (average-depth method)
//!
//! All calculators are pure functions over sanitized inputs. Invalid numbers
//! become zero rather than errors, and runtimes that cannot be expressed as a
//! duration come back as [`Runtime::NotApplicable`] or [`Runtime::Unlimited`].

// Core types and utilities
pub mod core_types;

pub mod config;
pub mod error;
pub mod hydration;
pub mod summary;
pub mod supply;

// Re-export core types
pub use core_types::{Feet, Fraction, Gallons, GallonsPerMinute, HoursMinutes, Minutes, Runtime};

// Re-export calculators
pub use hydration::{compute_zone_cycle, BreakSchedule, ZoneCount, ZoneCycleStats};
pub use supply::{
    compute_backup_runtime, compute_foam_runtime, estimate_volume, total_average_flow,
    BackupSourceRuntime, FoamRuntime, FoamTankSize, PoolDimensions, PoolShape,
    PoolVolumeEstimate,
};

// Re-export configuration and derived summary
pub use config::{BackupSourceConfig, CalculatorConfig, PoolHelperConfig, SystemConfig};
pub use error::{ConfigError, ScheduleError};
pub use summary::{RuntimeSummary, SystemSummary};
