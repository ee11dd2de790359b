//! Supply side: foam tanks, the shared backup water source, and the
//! pool/tank volume helper that sizes it.

pub mod backup;
pub mod foam;
pub mod volume;

pub use backup::{compute_backup_runtime, total_average_flow, BackupSourceRuntime};
pub use foam::{compute_foam_runtime, FoamRuntime, FoamTankSize, FOAM_MIX_RATIO};
pub use volume::{
    estimate_volume, PoolDimensions, PoolShape, PoolVolumeEstimate, GALLONS_PER_CUBIC_FOOT,
};
