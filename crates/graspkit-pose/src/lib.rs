#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Door-specific pose extraction.
pub mod door;

/// Error types for the pose module.
pub mod error;

/// The default pose estimation pipeline.
pub mod estimator;

pub use door::{DoorGrasp, DoorPoseEstimator};
pub use error::EstimationError;
pub use estimator::{ObjectPoseEstimator, PoseEstimator};
