use graspkit_3d::normals::center_normal;
use graspkit_3d::obb::oriented_bounding_box;
use graspkit_3d::{Mask, Pose, RgbdImage};
use graspkit_calib::{CalibrationRegistry, CameraCalibration, CameraSource};

use crate::error::EstimationError;
use crate::estimator::masked_cloud;

/// Default standoff between the pregrasp waypoint and the target, in meters.
pub const DEFAULT_STANDOFF_M: f64 = 0.205;

/// The object pose and its pregrasp waypoint, both in the robot base frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorGrasp {
    /// Pose of the grasp target (e.g. the doorknob).
    pub object: Pose,
    /// Waypoint offset from the target along the surface normal.
    pub pregrasp: Pose,
}

/// Pose extraction for planar targets approached face-on.
///
/// Uses two masks: one selecting the grasp target (the knob) and one
/// selecting the surrounding surface (the door). The surface cloud defines
/// the approach direction through its center normal; the target cloud
/// defines the grasp pose through its oriented bounding box.
#[derive(Debug, Clone)]
pub struct DoorPoseEstimator {
    calibration: CameraCalibration,
}

impl DoorPoseEstimator {
    /// Create an estimator from a calibration record.
    pub fn new(calibration: CameraCalibration) -> Self {
        Self { calibration }
    }

    /// Create an estimator for one of the registered cameras.
    pub fn from_source(registry: &CalibrationRegistry, source: CameraSource) -> Self {
        Self::new(*registry.get(source))
    }

    /// Estimate the target pose and its pregrasp waypoint.
    ///
    /// The waypoint is the target pose shifted by `standoff_m` along the
    /// surface normal in the camera frame; both poses are then mapped into
    /// the robot base frame through the camera extrinsic.
    ///
    /// # Arguments
    ///
    /// * `observation` - The RGB-D observation.
    /// * `target_mask` - Mask selecting the grasp target.
    /// * `surface_mask` - Mask selecting the surface around the target.
    /// * `standoff_m` - Distance between waypoint and target, in meters.
    pub fn estimate_grasp(
        &self,
        observation: &RgbdImage,
        target_mask: Option<&Mask>,
        surface_mask: Option<&Mask>,
        standoff_m: f64,
    ) -> Result<DoorGrasp, EstimationError> {
        let target_mask = target_mask.ok_or(EstimationError::MissingMask)?;
        let surface_mask = surface_mask.ok_or(EstimationError::MissingMask)?;

        let surface_cloud = masked_cloud(&self.calibration, observation, surface_mask)?;
        let normal =
            center_normal(&surface_cloud).map_err(|_| EstimationError::EmptyObservation)?;
        log::debug!("surface normal in camera frame: {normal:?}");

        let target_cloud = masked_cloud(&self.calibration, observation, target_mask)?;
        let obb = oriented_bounding_box(target_cloud.points())
            .map_err(|_| EstimationError::EmptyObservation)?;

        let object_in_camera = Pose::new(obb.rotation, obb.center);
        let pregrasp_in_camera = object_in_camera.translated(&[
            standoff_m * normal[0],
            standoff_m * normal[1],
            standoff_m * normal[2],
        ]);

        let base_from_camera = Pose::from(&self.calibration.extrinsic);
        Ok(DoorGrasp {
            object: base_from_camera.compose(&object_in_camera),
            pregrasp: base_from_camera.compose(&pregrasp_in_camera),
        })
    }
}
