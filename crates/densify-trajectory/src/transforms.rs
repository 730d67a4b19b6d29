use faer::prelude::SpSolver;

use crate::{error::TrajectoryError, tum::TumPose};

/// A 4x4 homogeneous rigid transform, row-major.
pub type Mat4 = [[f64; 4]; 4];

/// The identity transform.
pub const MAT4_IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Compute the rotation matrix from a quaternion in (qx, qy, qz, qw) order.
///
/// The quaternion is normalized first, so inputs that drifted from unit
/// length in storage map to the same rotation as their normalized
/// direction.
///
/// # Arguments
///
/// * `q` - The quaternion as `[qx, qy, qz, qw]`.
///
/// # Returns
///
/// The 3x3 rotation matrix, row-major.
///
/// Example:
///
/// ```
/// use densify_trajectory::transforms::quaternion_to_rotation_matrix;
///
/// let rotation = quaternion_to_rotation_matrix(&[0.0, 0.0, 0.0, 1.0]).unwrap();
/// assert_eq!(rotation, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
/// ```
pub fn quaternion_to_rotation_matrix(q: &[f64; 4]) -> Result<[[f64; 3]; 3], &'static str> {
    let norm = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
    if norm < 1e-12 {
        return Err("cannot compute rotation matrix from a zero-norm quaternion");
    }

    let (qx, qy, qz, qw) = (q[0] / norm, q[1] / norm, q[2] / norm, q[3] / norm);

    Ok([
        [
            1.0 - 2.0 * (qy * qy + qz * qz),
            2.0 * (qx * qy - qw * qz),
            2.0 * (qx * qz + qw * qy),
        ],
        [
            2.0 * (qx * qy + qw * qz),
            1.0 - 2.0 * (qx * qx + qz * qz),
            2.0 * (qy * qz - qw * qx),
        ],
        [
            2.0 * (qx * qz - qw * qy),
            2.0 * (qy * qz + qw * qx),
            1.0 - 2.0 * (qx * qx + qy * qy),
        ],
    ])
}

/// Compose a rotation and a translation into a homogeneous transform.
///
/// Pure builder with the fixed `[0, 0, 0, 1]` bottom row.
pub fn make_transform(rotation: &[[f64; 3]; 3], translation: &[f64; 3]) -> Mat4 {
    let mut transform = MAT4_IDENTITY;
    for i in 0..3 {
        transform[i][..3].copy_from_slice(&rotation[i]);
        transform[i][3] = translation[i];
    }
    transform
}

/// Convert a pose sequence into homogeneous transforms, in input order.
///
/// # Arguments
///
/// * `poses` - The ordered pose sequence.
///
/// # Returns
///
/// One transform per pose. An empty sequence is an error, as is any pose
/// carrying a zero-norm quaternion; both corrupt all downstream geometry.
pub fn convert_trajectory(poses: &[TumPose]) -> Result<Vec<Mat4>, TrajectoryError> {
    if poses.is_empty() {
        return Err(TrajectoryError::EmptyTrajectory);
    }

    poses
        .iter()
        .enumerate()
        .map(|(index, pose)| {
            let rotation = quaternion_to_rotation_matrix(&pose.rotation)
                .map_err(|_| TrajectoryError::DegenerateQuaternion { index })?;
            Ok(make_transform(&rotation, &pose.translation))
        })
        .collect()
}

/// Multiply two homogeneous transforms.
pub fn mat4_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [[0.0; 4]; 4];
    for (i, row) in a.iter().enumerate() {
        for j in 0..4 {
            out[i][j] = (0..4).map(|k| row[k] * b[k][j]).sum();
        }
    }
    out
}

/// Determinant of the 3x3 rotation block of a transform.
pub fn rotation_determinant(m: &Mat4) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Invert a homogeneous transform via LU decomposition.
///
/// Returns `None` when the matrix is not invertible. The inverse is a
/// true matrix inverse rather than the rigid-body shortcut so that a
/// rotation block corrupted upstream is surfaced instead of silently
/// transposed.
pub fn mat4_inverse(m: &Mat4) -> Option<Mat4> {
    let m_slice = unsafe { std::slice::from_raw_parts(m.as_ptr() as *const f64, 16) };
    let m_mat = faer::mat::from_row_major_slice(m_slice, 4, 4);

    let inv = m_mat
        .partial_piv_lu()
        .solve(faer::Mat::<f64>::identity(4, 4));

    let mut out = [[0.0; 4]; 4];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            let v = inv.read(i, j);
            if !v.is_finite() {
                return None;
            }
            *value = v;
        }
    }
    Some(out)
}
