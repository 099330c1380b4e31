use graspkit_3d::Point3dError;
use graspkit_calib::CalibrationError;

/// An error type for the pose estimation module.
#[derive(thiserror::Error, Debug)]
pub enum EstimationError {
    /// Error when no segmentation mask was provided.
    #[error("segmentation mask is missing")]
    MissingMask,

    /// Error when the mask or image shape does not match the calibration resolution.
    #[error("observation size ({0}x{1}) does not match the calibration resolution ({2}x{3})")]
    ShapeMismatch(usize, usize, usize, usize),

    /// Error when no valid points remain after masking and outlier removal.
    #[error("no valid points remain after masking and outlier removal")]
    EmptyObservation,

    /// Error from the calibration registry.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// Error from the point cloud primitives.
    #[error(transparent)]
    Geometry(#[from] Point3dError),
}
