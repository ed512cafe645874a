//! Helper functions: DH link matrix, pose error terms, validity and debug printing.

use crate::kinematic_traits::{Joints, Pose};
use crate::parameters::DhLink;
use nalgebra::{Isometry3, Vector3};

/// Computes the homogeneous transform of one DH link for the given joint angle,
/// following the standard convention `Rz(theta) * Tz(d) * Tx(a) * Rx(alpha)`.
pub fn dh_matrix(link: &DhLink, theta: f64) -> Pose {
    Isometry3::rotation(Vector3::z() * theta)
        * Isometry3::translation(0.0, 0.0, link.d)
        * Isometry3::translation(link.a, 0.0, 0.0)
        * Isometry3::rotation(Vector3::x() * link.alpha)
}

/// Distance between two 3D points.
pub fn distance(p1: &Vector3<f64>, p2: &Vector3<f64>) -> f64 {
    (p2 - p1).norm()
}

/// Linear error between two poses: desired translation minus current translation.
pub fn linear_error(current: &Pose, desired: &Pose) -> Vector3<f64> {
    desired.translation.vector - current.translation.vector
}

/// Angular error between two poses in axis-angle notation, computed as half the
/// sum of cross products of corresponding rotation columns.
///
/// This is a first-order (small-angle) approximation: its magnitude equals
/// `sin(angle)` rather than the angle itself, so it must not be used to report
/// large rotation distances. It is adequate as a gradient direction inside an
/// iterative corrector that re-evaluates it on every step, which is the only way
/// the solver consumes it.
pub fn angular_error(current: &Pose, desired: &Pose) -> Vector3<f64> {
    let r_current = current.rotation.to_rotation_matrix();
    let r_desired = desired.rotation.to_rotation_matrix();
    let m_current = r_current.matrix();
    let m_desired = r_desired.matrix();

    let mut sum = Vector3::zeros();
    for k in 0..3 {
        let current_column: Vector3<f64> = m_current.column(k).clone_owned();
        let desired_column: Vector3<f64> = m_desired.column(k).clone_owned();
        sum += current_column.cross(&desired_column);
    }
    0.5 * sum
}

/// Checks if all joint values are finite. A NaN or infinity anywhere in the
/// configuration indicates a numerical bug upstream, not a valid state.
pub fn is_valid(qs: &[f64]) -> bool {
    qs.iter().all(|&q| q.is_finite())
}

/// Print joint values, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_joints(joints: &[f64]) {
    let mut row_str = String::new();
    for &joint in joints {
        row_str.push_str(&format!("{:5.2} ", joint.to_degrees()));
    }
    println!("[{}]", row_str.trim_end());
}

/// Allows to specify joint values in degrees (converts to radians)
#[allow(dead_code)]
pub fn as_radians(degrees: &[i32]) -> Joints {
    degrees.iter().map(|&d| (d as f64).to_radians()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::UnitQuaternion;
    use std::f64::consts::PI;

    #[test]
    fn test_dh_matrix_against_closed_form() {
        let link = DhLink::new("link", 0.2, 0.5, 0.3);
        let theta: f64 = 0.7;
        let t = dh_matrix(&link, theta).to_homogeneous();

        let (ct, st) = (theta.cos(), theta.sin());
        let (ca, sa) = (link.alpha.cos(), link.alpha.sin());
        let expected = [
            [ct, -st * ca, st * sa, link.a * ct],
            [st, ct * ca, -ct * sa, link.a * st],
            [0.0, sa, ca, link.d],
            [0.0, 0.0, 0.0, 1.0],
        ];
        for row in 0..4 {
            for col in 0..4 {
                assert!(
                    (t[(row, col)] - expected[row][col]).abs() < 1e-12,
                    "[{},{}]: {} != {}",
                    row,
                    col,
                    t[(row, col)],
                    expected[row][col]
                );
            }
        }
    }

    #[test]
    fn test_linear_error() {
        let current = Isometry3::translation(1.0, 2.0, 3.0);
        let desired = Isometry3::translation(1.5, 1.0, 3.0);
        let err = linear_error(&current, &desired);
        assert!((err - Vector3::new(0.5, -1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_angular_error_zero_for_equal_poses() {
        let pose = Isometry3::from_parts(
            Vector3::new(0.1, 0.2, 0.3).into(),
            UnitQuaternion::from_euler_angles(0.4, 0.5, 0.6),
        );
        assert!(angular_error(&pose, &pose).norm() < 1e-12);
    }

    #[test]
    fn test_angular_error_small_rotation() {
        // For a rotation by angle about a fixed axis, the half-cross-sum gives
        // sin(angle) * axis.
        let angle = 0.1;
        let current = Isometry3::identity();
        let desired: Pose = Isometry3::rotation(Vector3::z() * angle);
        let err = angular_error(&current, &desired);
        assert!((err - Vector3::new(0.0, 0.0, angle.sin())).norm() < 1e-12);
    }

    #[test]
    fn test_distance() {
        let p1 = Vector3::new(1.0, 0.0, 0.0);
        let p2 = Vector3::new(1.0, 3.0, 4.0);
        assert!((distance(&p1, &p2) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_is_valid_with_all_finite() {
        let qs = [0.0, 1.0, -1.0, 0.5, -0.5, PI];
        assert!(is_valid(&qs));
    }

    #[test]
    fn test_is_valid_with_nan() {
        let qs = [0.0, f64::NAN, 1.0, -1.0, 0.5, -0.5];
        assert!(!is_valid(&qs));
    }

    #[test]
    fn test_is_valid_with_infinity() {
        let qs = [0.0, f64::INFINITY, 1.0, -1.0, 0.5, -0.5];
        assert!(!is_valid(&qs));
    }
}
