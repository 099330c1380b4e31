#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the 3d module.
pub mod error;

/// Linear algebra utilities.
pub mod linalg;

/// Surface normal estimation.
pub mod normals;

/// Oriented bounding box fitting.
pub mod obb;

/// Statistical outlier removal.
pub mod outlier;

/// Point cloud container.
pub mod pointcloud;

/// RGB-D images, masks, and pinhole back-projection.
pub mod rgbd;

/// Rigid transforms.
pub mod transform;

pub use error::Point3dError;
pub use obb::OrientedBoundingBox;
pub use pointcloud::PointCloud;
pub use rgbd::{DepthScaling, Mask, RgbdImage};
pub use transform::Pose;
