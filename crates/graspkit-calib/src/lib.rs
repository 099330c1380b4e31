#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Camera calibration types.
pub mod camera;

/// Error types for the calibration module.
pub mod error;

/// The built-in calibration registry.
pub mod registry;

pub use camera::{CameraCalibration, CameraExtrinsic, CameraIntrinsic, CameraSource};
pub use error::CalibrationError;
pub use registry::CalibrationRegistry;
