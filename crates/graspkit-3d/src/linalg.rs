use nalgebra::{Matrix3, Vector3};

use crate::error::Point3dError;

/// Multiply two 3x3 matrices.
pub fn matmul33(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    out
}

/// Apply a rotation to a 3D point.
#[inline]
pub fn rotate_point3d(rotation: &[[f64; 3]; 3], point: &[f64; 3]) -> [f64; 3] {
    let rotated = mat3(rotation) * Vector3::new(point[0], point[1], point[2]);
    [rotated.x, rotated.y, rotated.z]
}

/// Transform a set of points using a rotation and translation.
///
/// # Arguments
///
/// * `src_points` - A set of points to be transformed.
/// * `dst_r_src` - A rotation matrix.
/// * `dst_t_src` - A translation vector.
/// * `dst_points` - A pre-allocated buffer to store the transformed points.
///
/// PRECONDITION: `dst_points` is pre-allocated with the same size as the source.
pub fn transform_points3d(
    src_points: &[[f64; 3]],
    dst_r_src: &[[f64; 3]; 3],
    dst_t_src: &[f64; 3],
    dst_points: &mut [[f64; 3]],
) -> Result<(), Point3dError> {
    if src_points.len() != dst_points.len() {
        return Err(Point3dError::InvalidShape(
            dst_points.len(),
            src_points.len(),
        ));
    }

    let rotation = mat3(dst_r_src);
    let translation = Vector3::new(dst_t_src[0], dst_t_src[1], dst_t_src[2]);

    for (point_dst, point_src) in dst_points.iter_mut().zip(src_points.iter()) {
        let transformed =
            rotation * Vector3::new(point_src[0], point_src[1], point_src[2]) + translation;
        point_dst[0] = transformed.x;
        point_dst[1] = transformed.y;
        point_dst[2] = transformed.z;
    }

    Ok(())
}

/// Compute the Euclidean distance between two points.
///
/// Example:
/// ```
/// use graspkit_3d::linalg::euclidean_distance;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// let dst = euclidean_distance(&a, &b);
/// ```
pub fn euclidean_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}

/// Build a nalgebra matrix from a row-major 3x3 array.
pub(crate) fn mat3(m: &[[f64; 3]; 3]) -> Matrix3<f64> {
    Matrix3::new(
        m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
    )
}
