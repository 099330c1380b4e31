use std::cmp::Ordering;

use nalgebra::{Matrix3, Vector3};

use crate::error::Point3dError;

/// An oriented bounding box fitted to a point set.
#[derive(Debug, Clone)]
pub struct OrientedBoundingBox {
    /// Principal axes of the box as a rotation matrix, row major.
    pub rotation: [[f64; 3]; 3],
    /// Center of the box in the input frame.
    pub center: [f64; 3],
    /// Side lengths along the principal axes, sorted by descending variance.
    pub extent: [f64; 3],
}

/// Fit the oriented bounding box of a point set.
///
/// The axes are the principal components of the set (eigenvectors of the
/// covariance matrix, sorted by descending eigenvalue, with the third axis
/// flipped when needed to keep the basis right-handed) and the center is the
/// midpoint of the projected extents mapped back into the input frame.
///
/// # Arguments
///
/// * `points` - The point set to fit.
///
/// # Returns
///
/// The fitted box, or `Point3dError::EmptyPointCloud` for an empty input.
pub fn oriented_bounding_box(points: &[[f64; 3]]) -> Result<OrientedBoundingBox, Point3dError> {
    if points.is_empty() {
        return Err(Point3dError::EmptyPointCloud);
    }

    let mut mean = Vector3::zeros();
    for point in points {
        mean += Vector3::new(point[0], point[1], point[2]);
    }
    mean /= points.len() as f64;

    let mut covariance = Matrix3::zeros();
    for point in points {
        let centered = Vector3::new(point[0], point[1], point[2]) - mean;
        covariance += centered * centered.transpose();
    }
    covariance /= points.len() as f64;

    let eigen = covariance.symmetric_eigen();

    // principal axes by descending variance
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(Ordering::Equal)
    });
    let mut axes = [
        eigen.eigenvectors.column(order[0]).into_owned(),
        eigen.eigenvectors.column(order[1]).into_owned(),
        eigen.eigenvectors.column(order[2]).into_owned(),
    ];

    // flip the third axis if the basis came out left-handed
    if axes[0].cross(&axes[1]).dot(&axes[2]) < 0.0 {
        axes[2] = -axes[2];
    }

    let mut min_proj = [f64::INFINITY; 3];
    let mut max_proj = [f64::NEG_INFINITY; 3];
    for point in points {
        let centered = Vector3::new(point[0], point[1], point[2]) - mean;
        for (k, axis) in axes.iter().enumerate() {
            let projection = axis.dot(&centered);
            min_proj[k] = min_proj[k].min(projection);
            max_proj[k] = max_proj[k].max(projection);
        }
    }

    let mut center_vec = mean;
    let mut extent = [0.0; 3];
    for (k, axis) in axes.iter().enumerate() {
        let mid = 0.5 * (min_proj[k] + max_proj[k]);
        center_vec += axis * mid;
        extent[k] = max_proj[k] - min_proj[k];
    }

    let mut rotation = [[0.0; 3]; 3];
    for (k, axis) in axes.iter().enumerate() {
        for i in 0..3 {
            rotation[i][k] = axis[i];
        }
    }

    Ok(OrientedBoundingBox {
        rotation,
        center: [center_vec.x, center_vec.y, center_vec.z],
        extent,
    })
}
