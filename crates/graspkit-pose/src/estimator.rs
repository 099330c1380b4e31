use graspkit_3d::obb::oriented_bounding_box;
use graspkit_3d::outlier::remove_statistical_outliers;
use graspkit_3d::rgbd::{masked_depth, pointcloud_from_rgbd, DepthScaling};
use graspkit_3d::{Mask, PointCloud, Pose, RgbdImage};
use graspkit_calib::{CalibrationRegistry, CameraCalibration, CameraSource};

use crate::error::EstimationError;

/// Neighborhood size of the statistical outlier filter.
pub const OUTLIER_NEIGHBORS: usize = 20;

/// Rejection threshold of the statistical outlier filter, in standard deviations.
pub const OUTLIER_STD_RATIO: f64 = 2.0;

/// The capability seam between detection backends and the geometric pipeline.
///
/// A detector produces the segmentation mask; anything implementing this
/// trait turns the masked observation into an oriented pose in the robot
/// base frame.
pub trait ObjectPoseEstimator {
    /// Estimate the pose of the masked object in the robot base frame.
    fn estimate_pose(
        &self,
        observation: &RgbdImage,
        mask: Option<&Mask>,
    ) -> Result<Pose, EstimationError>;
}

/// The default pose extraction pipeline.
///
/// Back-projects the masked depth map into a colored point cloud, rejects
/// statistical outliers, fits an oriented bounding box, and maps the
/// resulting pose into the robot base frame through the camera extrinsic.
#[derive(Debug, Clone)]
pub struct PoseEstimator {
    calibration: CameraCalibration,
}

impl PoseEstimator {
    /// Create an estimator from a calibration record.
    pub fn new(calibration: CameraCalibration) -> Self {
        Self { calibration }
    }

    /// Create an estimator for one of the registered cameras.
    pub fn from_source(registry: &CalibrationRegistry, source: CameraSource) -> Self {
        Self::new(*registry.get(source))
    }

    /// The calibration the estimator was constructed with.
    pub fn calibration(&self) -> &CameraCalibration {
        &self.calibration
    }
}

impl ObjectPoseEstimator for PoseEstimator {
    fn estimate_pose(
        &self,
        observation: &RgbdImage,
        mask: Option<&Mask>,
    ) -> Result<Pose, EstimationError> {
        let mask = mask.ok_or(EstimationError::MissingMask)?;

        let cloud = masked_cloud(&self.calibration, observation, mask)?;
        let cloud = remove_statistical_outliers(&cloud, OUTLIER_NEIGHBORS, OUTLIER_STD_RATIO);

        let centroid = cloud
            .centroid()
            .ok_or(EstimationError::EmptyObservation)?;
        let obb = oriented_bounding_box(cloud.points())
            .map_err(|_| EstimationError::EmptyObservation)?;

        // The translation keeps the raw centroid in x/y and takes z from the
        // box center; the planners downstream are tuned against this mix.
        let translation = [centroid[0], centroid[1], obb.center[2]];
        let pose_in_camera = Pose::new(obb.rotation, translation);

        Ok(Pose::from(&self.calibration.extrinsic).compose(&pose_in_camera))
    }
}

/// Mask, rescale, and back-project an observation with a camera calibration.
///
/// Masked-out samples receive the out-of-range sentinel, the remaining depth
/// is rescaled by the inverse depth scale, and the valid pixels are
/// back-projected through the pinhole intrinsics.
pub(crate) fn masked_cloud(
    calibration: &CameraCalibration,
    observation: &RgbdImage,
    mask: &Mask,
) -> Result<PointCloud, EstimationError> {
    let intrinsic = &calibration.intrinsic;
    if observation.width != intrinsic.width || observation.height != intrinsic.height {
        return Err(EstimationError::ShapeMismatch(
            observation.width,
            observation.height,
            intrinsic.width,
            intrinsic.height,
        ));
    }
    if mask.width != observation.width || mask.height != observation.height {
        return Err(EstimationError::ShapeMismatch(
            mask.width,
            mask.height,
            observation.width,
            observation.height,
        ));
    }

    let mut depth = masked_depth(&observation.depth, mask);
    for sample in &mut depth {
        *sample /= calibration.depth_scale;
    }

    let rescaled = RgbdImage::new(
        observation.rgb.clone(),
        depth,
        observation.width,
        observation.height,
    )?;

    let cloud = pointcloud_from_rgbd(&rescaled, intrinsic, &DepthScaling::default());
    log::debug!(
        "masked observation produced {} points from {} selected pixels",
        cloud.len(),
        mask.count_selected()
    );
    Ok(cloud)
}
