use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;

/// Represents the intrinsic parameters of a pinhole camera.
///
/// # Fields
///
/// * `fx` - The focal length in the x direction
/// * `fy` - The focal length in the y direction
/// * `cx` - The x coordinate of the principal point
/// * `cy` - The y coordinate of the principal point
/// * `width` - The image width in pixels
/// * `height` - The image height in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsic {
    /// The focal length in the x direction
    pub fx: f64,
    /// The focal length in the y direction
    pub fy: f64,
    /// The x coordinate of the principal point
    pub cx: f64,
    /// The y coordinate of the principal point
    pub cy: f64,
    /// The image width in pixels
    pub width: usize,
    /// The image height in pixels
    pub height: usize,
}

/// Represents the extrinsic parameters of a camera.
///
/// The rotation and translation map points from the camera frame into the
/// robot base frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraExtrinsic {
    /// The rotation matrix of the camera 3x3
    pub rotation: [[f64; 3]; 3],
    /// The translation vector of the camera 3x1
    pub translation: [f64; 3],
}

/// A complete calibration record for one camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraCalibration {
    /// The pinhole intrinsics of the camera.
    pub intrinsic: CameraIntrinsic,
    /// The fixed rigid transform from camera frame to robot base frame.
    pub extrinsic: CameraExtrinsic,
    /// Raw-to-meters factor for the depth stream.
    pub depth_scale: f64,
    /// Brown-Conrady distortion coefficients as recorded for the camera.
    ///
    /// Carried with the calibration for completeness; the back-projection
    /// pipeline operates on the undistorted pinhole model.
    pub distortion: [f64; 5],
}

/// Identifier for one of the robot's RGB-D camera mounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraSource {
    /// The head-mounted camera, rotated 90 degrees on the mast.
    Stretch,
    /// The arm-mounted camera on unit 205.
    Arm205,
    /// The arm-mounted camera on unit 188.
    Arm188,
}

impl CameraSource {
    /// The string identifier used by configuration and telemetry.
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraSource::Stretch => "stretch",
            CameraSource::Arm205 => "arm205",
            CameraSource::Arm188 => "arm188",
        }
    }
}

impl FromStr for CameraSource {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stretch" => Ok(CameraSource::Stretch),
            "arm205" => Ok(CameraSource::Arm205),
            "arm188" => Ok(CameraSource::Arm188),
            other => Err(CalibrationError::UnknownCameraSource(other.to_string())),
        }
    }
}

impl std::fmt::Display for CameraSource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_source_roundtrip() -> Result<(), CalibrationError> {
        for name in ["stretch", "arm205", "arm188"] {
            let source = CameraSource::from_str(name)?;
            assert_eq!(source.as_str(), name);
        }
        Ok(())
    }

    #[test]
    fn test_camera_source_unknown() {
        let err = CameraSource::from_str("arm206");
        assert!(matches!(
            err,
            Err(CalibrationError::UnknownCameraSource(ref s)) if s == "arm206"
        ));
    }

    #[test]
    fn test_calibration_serde_roundtrip() -> Result<(), serde_json::Error> {
        let calibration = CameraCalibration {
            intrinsic: CameraIntrinsic {
                fx: 500.0,
                fy: 500.0,
                cx: 320.0,
                cy: 240.0,
                width: 640,
                height: 480,
            },
            extrinsic: CameraExtrinsic {
                rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
                translation: [0.0, 0.0, 0.0],
            },
            depth_scale: 0.001,
            distortion: [0.0; 5],
        };

        let json = serde_json::to_string(&calibration)?;
        let decoded: CameraCalibration = serde_json::from_str(&json)?;
        assert_eq!(decoded, calibration);
        Ok(())
    }
}
