use graspkit_calib::CameraExtrinsic;

use crate::error::Point3dError;
use crate::linalg::{matmul33, rotate_point3d};

/// A rigid transform with value semantics.
///
/// Equivalent to the 4x4 homogeneous matrix `[R | t; 0 0 0 1]` with `R`
/// orthonormal and `t` in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// The rotation block, row major.
    pub rotation: [[f64; 3]; 3],
    /// The translation vector in meters.
    pub translation: [f64; 3],
}

impl Pose {
    /// Create a pose from a rotation and a translation.
    pub fn new(rotation: [[f64; 3]; 3], translation: [f64; 3]) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0, 0.0, 0.0],
        }
    }

    /// The position encoded by the pose (its translation).
    #[inline]
    pub fn position(&self) -> [f64; 3] {
        self.translation
    }

    /// Compose two poses: `self * rhs`, applying `rhs` first.
    pub fn compose(&self, rhs: &Pose) -> Pose {
        let rotation = matmul33(&self.rotation, &rhs.rotation);
        let rotated = rotate_point3d(&self.rotation, &rhs.translation);
        let translation = [
            rotated[0] + self.translation[0],
            rotated[1] + self.translation[1],
            rotated[2] + self.translation[2],
        ];
        Pose::new(rotation, translation)
    }

    /// Apply the pose to a point.
    pub fn transform_point(&self, point: &[f64; 3]) -> [f64; 3] {
        let rotated = rotate_point3d(&self.rotation, point);
        [
            rotated[0] + self.translation[0],
            rotated[1] + self.translation[1],
            rotated[2] + self.translation[2],
        ]
    }

    /// The same pose with its translation shifted by `offset`.
    pub fn translated(&self, offset: &[f64; 3]) -> Pose {
        Pose::new(
            self.rotation,
            [
                self.translation[0] + offset[0],
                self.translation[1] + offset[1],
                self.translation[2] + offset[2],
            ],
        )
    }

    /// The pose as a 4x4 homogeneous matrix.
    pub fn to_homogeneous(&self) -> [[f64; 4]; 4] {
        let mut out = [[0.0; 4]; 4];
        for i in 0..3 {
            out[i][..3].copy_from_slice(&self.rotation[i]);
            out[i][3] = self.translation[i];
        }
        out[3][3] = 1.0;
        out
    }

    /// Build a pose from a 4x4 homogeneous matrix, ignoring the bottom row.
    pub fn from_homogeneous(matrix: &[[f64; 4]; 4]) -> Pose {
        let mut rotation = [[0.0; 3]; 3];
        let mut translation = [0.0; 3];
        for i in 0..3 {
            rotation[i].copy_from_slice(&matrix[i][..3]);
            translation[i] = matrix[i][3];
        }
        Pose::new(rotation, translation)
    }
}

impl From<&CameraExtrinsic> for Pose {
    fn from(extrinsic: &CameraExtrinsic) -> Self {
        Pose::new(extrinsic.rotation, extrinsic.translation)
    }
}

/// Compute the rotation matrix from an axis and angle.
///
/// # Arguments
///
/// * `axis` - The axis of rotation.
/// * `angle` - The angle of rotation in radians.
///
/// # Returns
///
/// The rotation matrix.
pub fn axis_angle_to_rotation_matrix(
    axis: &[f64; 3],
    angle: f64,
) -> Result<[[f64; 3]; 3], Point3dError> {
    // normalize the vector
    let axis_norm = {
        let magnitude = (axis[0].powi(2) + axis[1].powi(2) + axis[2].powi(2)).sqrt();
        match magnitude < 1e-10 {
            true => return Err(Point3dError::DegenerateAxis),
            false => [
                axis[0] / magnitude,
                axis[1] / magnitude,
                axis[2] / magnitude,
            ],
        }
    };

    let x = axis_norm[0];
    let y = axis_norm[1];
    let z = axis_norm[2];

    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;

    let m00 = c + x * x * t;
    let m11 = c + y * y * t;
    let m22 = c + z * z * t;

    let tmp1 = x * y * t;
    let tmp2 = z * s;

    let m10 = tmp1 + tmp2;
    let m01 = tmp1 - tmp2;

    let tmp3 = x * z * t;
    let tmp4 = y * s;

    let m20 = tmp3 - tmp4;
    let m02 = tmp3 + tmp4;

    let tmp5 = y * z * t;
    let tmp6 = x * s;

    let m12 = tmp5 - tmp6;
    let m21 = tmp5 + tmp6;

    Ok([[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_orthonormal(rotation: &[[f64; 3]; 3]) {
        // columns are unit norm and mutually orthogonal
        for j in 0..3 {
            let norm: f64 = (0..3).map(|i| rotation[i][j] * rotation[i][j]).sum();
            assert_relative_eq!(norm, 1.0, epsilon = 1e-9);
            for k in (j + 1)..3 {
                let dot: f64 = (0..3).map(|i| rotation[i][j] * rotation[i][k]).sum();
                assert_relative_eq!(dot, 0.0, epsilon = 1e-9);
            }
        }

        let det = rotation[0][0] * (rotation[1][1] * rotation[2][2] - rotation[1][2] * rotation[2][1])
            - rotation[0][1] * (rotation[1][0] * rotation[2][2] - rotation[1][2] * rotation[2][0])
            + rotation[0][2] * (rotation[1][0] * rotation[2][1] - rotation[1][1] * rotation[2][0]);
        assert_relative_eq!(det, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_identity_compose() {
        let pose = Pose::new(
            [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            [1.0, 2.0, 3.0],
        );
        assert_eq!(Pose::identity().compose(&pose), pose);
        assert_eq!(pose.compose(&Pose::identity()), pose);
    }

    #[test]
    fn test_compose_preserves_orthonormality() -> Result<(), Point3dError> {
        let mut pose = Pose::identity();
        for _ in 0..50 {
            let axis = [
                rand::random::<f64>() - 0.5,
                rand::random::<f64>() - 0.5,
                rand::random::<f64>() + 0.5,
            ];
            let angle = rand::random::<f64>() * std::f64::consts::PI;
            let rotation = axis_angle_to_rotation_matrix(&axis, angle)?;
            let step = Pose::new(rotation, [rand::random(), rand::random(), rand::random()]);
            pose = pose.compose(&step);
        }
        assert_orthonormal(&pose.rotation);
        Ok(())
    }

    #[test]
    fn test_homogeneous_roundtrip() {
        let pose = Pose::new(
            [[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [0.5, -0.25, 2.0],
        );
        let matrix = pose.to_homogeneous();
        assert_eq!(matrix[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Pose::from_homogeneous(&matrix), pose);
    }

    #[test]
    fn test_transform_point_matches_compose() {
        let base_from_cam = Pose::new(
            [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            [0.1, 0.2, 0.3],
        );
        let point_in_cam = [1.0, 0.0, 2.0];

        let point_in_base = base_from_cam.transform_point(&point_in_cam);
        let as_pose = base_from_cam.compose(&Pose::new(
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            point_in_cam,
        ));
        for i in 0..3 {
            assert_relative_eq!(point_in_base[i], as_pose.translation[i]);
        }
    }

    #[test]
    fn test_degenerate_axis() {
        let result = axis_angle_to_rotation_matrix(&[0.0, 0.0, 0.0], 1.0);
        assert!(matches!(result, Err(Point3dError::DegenerateAxis)));
    }
}
