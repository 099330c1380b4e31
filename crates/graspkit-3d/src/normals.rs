use std::cmp::Ordering;

use kiddo::immutable::float::kdtree::ImmutableKdTree;
use nalgebra::{Matrix3, Vector3};

use crate::error::Point3dError;
use crate::pointcloud::PointCloud;

/// Default neighborhood size for normal estimation.
pub const DEFAULT_NORMAL_NEIGHBORS: usize = 30;

/// Estimate a unit normal per point from its local neighborhood.
///
/// Each normal is the least-variance principal axis of the point's
/// `nb_neighbors` nearest neighbors, oriented toward the camera origin so
/// that approach directions computed from them always face the sensor.
///
/// # Arguments
///
/// * `points` - The point set in the camera frame.
/// * `nb_neighbors` - The neighborhood size of the plane fit.
///
/// # Returns
///
/// One unit normal per input point.
pub fn estimate_normals(points: &[[f64; 3]], nb_neighbors: usize) -> Vec<[f64; 3]> {
    if points.len() < 3 {
        return points.iter().map(toward_origin).collect();
    }

    let kdtree: ImmutableKdTree<f64, u32, 3, 32> = ImmutableKdTree::new_from_slice(points);
    let qty = (nb_neighbors + 1).min(points.len());

    points
        .iter()
        .map(|point| {
            let neighbors = kdtree
                .nearest_n::<kiddo::SquaredEuclidean>(point, std::num::NonZero::new(qty).unwrap());

            let mut mean = Vector3::zeros();
            for nn in &neighbors {
                let p = points[nn.item as usize];
                mean += Vector3::new(p[0], p[1], p[2]);
            }
            mean /= neighbors.len() as f64;

            let mut covariance = Matrix3::zeros();
            for nn in &neighbors {
                let p = points[nn.item as usize];
                let centered = Vector3::new(p[0], p[1], p[2]) - mean;
                covariance += centered * centered.transpose();
            }

            let eigen = covariance.symmetric_eigen();
            let smallest = (0..3)
                .min_by(|&a, &b| {
                    eigen.eigenvalues[a]
                        .partial_cmp(&eigen.eigenvalues[b])
                        .unwrap_or(Ordering::Equal)
                })
                .unwrap_or(0);
            let axis = eigen.eigenvectors.column(smallest);

            let norm = axis.norm();
            if norm < 1e-12 {
                return toward_origin(point);
            }
            let mut normal = [axis[0] / norm, axis[1] / norm, axis[2] / norm];

            // orient toward the camera at the origin
            if normal[0] * point[0] + normal[1] * point[1] + normal[2] * point[2] > 0.0 {
                normal = [-normal[0], -normal[1], -normal[2]];
            }
            normal
        })
        .collect()
}

/// The unit normal of the point nearest the cloud's centroid.
///
/// Estimates normals over the whole cloud, locates the point closest to the
/// centroid with a nearest-neighbor query, and returns that point's normal.
///
/// # Arguments
///
/// * `cloud` - The point cloud in the camera frame.
///
/// # Returns
///
/// The camera-facing unit normal at the cloud center, or
/// `Point3dError::EmptyPointCloud` for an empty cloud.
pub fn center_normal(cloud: &PointCloud) -> Result<[f64; 3], Point3dError> {
    let centroid = cloud.centroid().ok_or(Point3dError::EmptyPointCloud)?;
    let points = cloud.points();

    let kdtree: ImmutableKdTree<f64, u32, 3, 32> = ImmutableKdTree::new_from_slice(points);
    let nearest = kdtree.nearest_one::<kiddo::SquaredEuclidean>(&centroid);

    let normals = estimate_normals(points, DEFAULT_NORMAL_NEIGHBORS);
    Ok(normals[nearest.item as usize])
}

/// Unit vector from a point toward the origin, used when a neighborhood is
/// too small for a plane fit.
fn toward_origin(point: &[f64; 3]) -> [f64; 3] {
    let norm = (point[0].powi(2) + point[1].powi(2) + point[2].powi(2)).sqrt();
    if norm < 1e-12 {
        return [0.0, 0.0, -1.0];
    }
    [-point[0] / norm, -point[1] / norm, -point[2] / norm]
}
