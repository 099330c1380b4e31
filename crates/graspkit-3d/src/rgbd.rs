use graspkit_calib::CameraIntrinsic;

use crate::error::Point3dError;
use crate::pointcloud::PointCloud;

/// Out-of-range sentinel written into depth samples excluded by a mask.
pub const MASKED_DEPTH_SENTINEL: f64 = -0.1;

/// A struct representing an RGB-D image.
#[derive(Debug, Clone)]
pub struct RgbdImage {
    /// The width of the image
    pub width: usize,
    /// The height of the image
    pub height: usize,
    /// The RGB image as a flat array of RGB values
    pub rgb: Vec<[u8; 3]>,
    /// The depth image as a flat array of depth values
    pub depth: Vec<f64>,
}

impl RgbdImage {
    /// Creates a new RgbdImage with the given RGB and depth arrays.
    pub fn new(
        rgb: Vec<[u8; 3]>,
        depth: Vec<f64>,
        width: usize,
        height: usize,
    ) -> Result<Self, Point3dError> {
        if rgb.len() != width * height {
            return Err(Point3dError::InvalidShape(rgb.len(), width * height));
        }
        if depth.len() != rgb.len() {
            return Err(Point3dError::InvalidShape(depth.len(), rgb.len()));
        }
        Ok(Self {
            width,
            height,
            rgb,
            depth,
        })
    }

    /// Returns the dimensions of the image (width, height).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get the depth value at a specific pixel.
    #[inline]
    pub fn get_depth(&self, x: usize, y: usize) -> f64 {
        self.depth[y * self.width + x]
    }

    /// Get the color value at a specific pixel.
    #[inline]
    pub fn get_color(&self, x: usize, y: usize) -> [u8; 3] {
        self.rgb[y * self.width + x]
    }
}

/// A boolean segmentation mask over an image.
#[derive(Debug, Clone)]
pub struct Mask {
    /// The width of the mask
    pub width: usize,
    /// The height of the mask
    pub height: usize,
    /// The mask values as a flat array, `true` for selected pixels
    pub data: Vec<bool>,
}

impl Mask {
    /// Creates a new Mask with the given data.
    pub fn new(data: Vec<bool>, width: usize, height: usize) -> Result<Self, Point3dError> {
        if data.len() != width * height {
            return Err(Point3dError::InvalidShape(data.len(), width * height));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A mask selecting every pixel of a `width` x `height` image.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![true; width * height],
        }
    }

    /// Get the mask value at a specific pixel.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x]
    }

    /// The number of selected pixels.
    pub fn count_selected(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

/// Copy a depth buffer, writing [`MASKED_DEPTH_SENTINEL`] into every sample
/// the mask excludes.
///
/// PRECONDITION: `depth` and `mask.data` have the same length.
pub fn masked_depth(depth: &[f64], mask: &Mask) -> Vec<f64> {
    depth
        .iter()
        .zip(mask.data.iter())
        .map(|(&d, &selected)| if selected { d } else { MASKED_DEPTH_SENTINEL })
        .collect()
}

/// Depth interpretation used during back-projection.
///
/// Depth samples are divided by `units_per_meter` and the result is only
/// accepted in the window `(0, max_depth_m]`. The defaults match the scaling
/// the RGB-D capture stack applies before handing depth to the estimator.
#[derive(Debug, Clone, Copy)]
pub struct DepthScaling {
    /// Depth units per meter.
    pub units_per_meter: f64,
    /// Samples deeper than this are discarded.
    pub max_depth_m: f64,
}

impl Default for DepthScaling {
    fn default() -> Self {
        Self {
            units_per_meter: 1000.0,
            max_depth_m: 3.0,
        }
    }
}

/// Back-project an RGB-D image through pinhole intrinsics into a colored
/// point cloud in the camera frame.
///
/// Every pixel with a depth sample inside the validity window of `scaling`
/// yields one point; masked-out or out-of-range samples (non-positive, or
/// beyond the truncation depth) yield none.
///
/// # Arguments
///
/// * `rgbd` - The RGB-D image to back-project.
/// * `intrinsic` - The pinhole intrinsics of the capturing camera.
/// * `scaling` - Depth unit conversion and truncation window.
///
/// # Returns
///
/// The colored point cloud in the camera frame.
pub fn pointcloud_from_rgbd(
    rgbd: &RgbdImage,
    intrinsic: &CameraIntrinsic,
    scaling: &DepthScaling,
) -> PointCloud {
    let mut points = Vec::with_capacity(rgbd.depth.len());
    let mut colors = Vec::with_capacity(rgbd.depth.len());

    for v in 0..rgbd.height {
        for u in 0..rgbd.width {
            let z = rgbd.get_depth(u, v) / scaling.units_per_meter;
            if z <= 0.0 || z > scaling.max_depth_m {
                continue;
            }
            let x = (u as f64 - intrinsic.cx) * z / intrinsic.fx;
            let y = (v as f64 - intrinsic.cy) * z / intrinsic.fy;
            points.push([x, y, z]);
            colors.push(rgbd.get_color(u, v));
        }
    }

    log::debug!(
        "back-projected {} of {} pixels",
        points.len(),
        rgbd.depth.len()
    );

    PointCloud::new(points, Some(colors), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_intrinsic() -> CameraIntrinsic {
        CameraIntrinsic {
            fx: 100.0,
            fy: 100.0,
            cx: 2.0,
            cy: 2.0,
            width: 4,
            height: 4,
        }
    }

    #[test]
    fn test_rgbd_shape_validation() {
        let result = RgbdImage::new(vec![[0, 0, 0]; 5], vec![0.0; 5], 2, 2);
        assert!(matches!(result, Err(Point3dError::InvalidShape(5, 4))));
    }

    #[test]
    fn test_masked_depth_sentinel() -> Result<(), Point3dError> {
        let mask = Mask::new(vec![true, false, true, false], 2, 2)?;
        let depth = masked_depth(&[1.0, 2.0, 3.0, 4.0], &mask);
        assert_eq!(depth, vec![1.0, MASKED_DEPTH_SENTINEL, 3.0, MASKED_DEPTH_SENTINEL]);
        Ok(())
    }

    #[test]
    fn test_backproject_principal_point() -> Result<(), Point3dError> {
        // depth of 1000 raw units = 1 m everywhere
        let rgbd = RgbdImage::new(vec![[10, 20, 30]; 16], vec![1000.0; 16], 4, 4)?;
        let cloud = pointcloud_from_rgbd(&rgbd, &test_intrinsic(), &DepthScaling::default());

        assert_eq!(cloud.len(), 16);

        // pixel (2, 2) sits on the principal point and projects to the optical axis
        let index = 2 * 4 + 2;
        let point = cloud.points()[index];
        assert_relative_eq!(point[0], 0.0);
        assert_relative_eq!(point[1], 0.0);
        assert_relative_eq!(point[2], 1.0);

        // one pixel to the right moves x by z / fx
        let right = cloud.points()[index + 1];
        assert_relative_eq!(right[0], 0.01);

        if let Some(colors) = cloud.colors() {
            assert_eq!(colors[index], [10, 20, 30]);
        }
        Ok(())
    }

    #[test]
    fn test_backproject_rejects_invalid_depth() -> Result<(), Point3dError> {
        let mut depth = vec![1000.0; 16];
        depth[0] = MASKED_DEPTH_SENTINEL;
        depth[1] = 0.0;
        depth[2] = 5000.0; // 5 m, beyond truncation
        let rgbd = RgbdImage::new(vec![[0, 0, 0]; 16], depth, 4, 4)?;

        let cloud = pointcloud_from_rgbd(&rgbd, &test_intrinsic(), &DepthScaling::default());
        assert_eq!(cloud.len(), 13);
        Ok(())
    }
}
