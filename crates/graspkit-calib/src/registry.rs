use crate::camera::{CameraCalibration, CameraExtrinsic, CameraIntrinsic, CameraSource};

/// Raw-to-meters factor shared by all RealSense depth streams on the robot.
const REALSENSE_DEPTH_SCALE: f64 = 0.0010000000474974513;

/// Calibration of the head-mounted camera, mast-rotated.
const STRETCH_CALIBRATION: CameraCalibration = CameraCalibration {
    intrinsic: CameraIntrinsic {
        fx: 911.8329467773438,
        fy: 911.9554443359375,
        cx: 647.63037109375,
        cy: 368.0513000488281,
        width: 1280,
        height: 720,
    },
    extrinsic: CameraExtrinsic {
        rotation: [
            [-0.00069263, 1.0, -0.0012349],
            [0.5214, -0.00069263, -0.85331],
            [-0.85331, -0.0012349, -0.52139],
        ],
        translation: [-0.017, -0.038, 1.294],
    },
    depth_scale: REALSENSE_DEPTH_SCALE,
    distortion: [0.0, 0.0, 0.0, 0.0, 0.0],
};

/// Intrinsics shared by both arm-mounted cameras.
const ARM_INTRINSIC: CameraIntrinsic = CameraIntrinsic {
    fx: 640.1092529296875,
    fy: 639.4522094726562,
    cx: 652.3712158203125,
    cy: 368.69549560546875,
    width: 1280,
    height: 720,
};

/// Distortion record shared by both arm-mounted cameras.
const ARM_DISTORTION: [f64; 5] = [
    -0.05686680227518082,
    0.06842068582773209,
    -0.0004524677060544491,
    0.0006787769380025566,
    -0.022475285455584526,
];

/// Calibration of the arm-mounted camera on unit 205.
const ARM205_CALIBRATION: CameraCalibration = CameraCalibration {
    intrinsic: ARM_INTRINSIC,
    extrinsic: CameraExtrinsic {
        rotation: [
            [-0.99652, -0.080247, -0.022519],
            [-0.023487, 0.52961, -0.84792],
            [0.079969, -0.84444, -0.52965],
        ],
        translation: [-0.055535, -0.053421, 1.4676],
    },
    depth_scale: REALSENSE_DEPTH_SCALE,
    distortion: ARM_DISTORTION,
};

/// Calibration of the arm-mounted camera on unit 188.
const ARM188_CALIBRATION: CameraCalibration = CameraCalibration {
    intrinsic: ARM_INTRINSIC,
    extrinsic: CameraExtrinsic {
        rotation: [
            [-0.99929, -0.021817, 0.030712],
            [-0.037528, 0.50515, -0.86222],
            [0.003297, -0.86276, -0.50561],
        ],
        translation: [-0.062167, -0.047745, 1.4732],
    },
    depth_scale: REALSENSE_DEPTH_SCALE,
    distortion: ARM_DISTORTION,
};

/// Immutable registry mapping each camera source to its calibration.
///
/// Constructed once at startup and passed by reference into the pose
/// estimators; calibration data is never reached through global state.
///
/// Example:
///
/// ```
/// use graspkit_calib::{CalibrationRegistry, CameraSource};
///
/// let registry = CalibrationRegistry::default();
/// let calibration = registry.get(CameraSource::Arm205);
/// assert_eq!(calibration.intrinsic.width, 1280);
/// ```
#[derive(Clone, Debug)]
pub struct CalibrationRegistry {
    stretch: CameraCalibration,
    arm205: CameraCalibration,
    arm188: CameraCalibration,
}

impl Default for CalibrationRegistry {
    fn default() -> Self {
        Self {
            stretch: STRETCH_CALIBRATION,
            arm205: ARM205_CALIBRATION,
            arm188: ARM188_CALIBRATION,
        }
    }
}

impl CalibrationRegistry {
    /// Create the registry with the factory calibration tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the calibration bound to a camera source.
    pub fn get(&self, source: CameraSource) -> &CameraCalibration {
        match source {
            CameraSource::Stretch => &self.stretch,
            CameraSource::Arm205 => &self.arm205,
            CameraSource::Arm188 => &self.arm188,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_registry_lookup() {
        let registry = CalibrationRegistry::new();

        let stretch = registry.get(CameraSource::Stretch);
        assert_relative_eq!(stretch.intrinsic.fx, 911.8329467773438);
        assert_relative_eq!(stretch.extrinsic.translation[2], 1.294);

        let arm205 = registry.get(CameraSource::Arm205);
        let arm188 = registry.get(CameraSource::Arm188);
        assert_eq!(arm205.intrinsic, arm188.intrinsic);
        assert_ne!(arm205.extrinsic, arm188.extrinsic);
    }

    #[test]
    fn test_registry_depth_scale() {
        let registry = CalibrationRegistry::new();
        for source in [CameraSource::Stretch, CameraSource::Arm205, CameraSource::Arm188] {
            let calibration = registry.get(source);
            assert_relative_eq!(calibration.depth_scale, 1e-3, epsilon = 1e-7);
        }
    }
}
