use nalgebra::Isometry3;
use std::error::Error;
use std::fmt;

/// Pose of a robot frame. It contains both Cartesian position and rotation quaternion,
/// and corresponds to the 4x4 homogeneous matrix with an orthonormal rotation block
/// (available via `to_homogeneous` where the matrix form is needed).
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(1.0, 0.0, 0.0);
/// // The quaternion should be normalized to represent a valid rotation.
/// let rotation = UnitQuaternion::from_quaternion(na::Quaternion::new(1.0, 0.0, 0.0, 1.0).normalize());
/// let transform = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Joint angles in radians, one value per degree of freedom, in the same order
/// as the rows of the DH table.
pub type Joints = Vec<f64>;

/// The kinematic interface of a serial arm. Implementations own the immutable
/// robot model; every method operates on caller-supplied joint values and keeps
/// no state between invocations.
pub trait Kinematics {
    /// Computes the pose of the tool in the world frame for the given joint angles.
    ///
    /// # Panics
    ///
    /// Panics if `q.len()` does not match the number of degrees of freedom.
    fn forward(&self, q: &[f64]) -> Pose;

    /// Computes the pose of the flange (the last DH frame) in the base frame,
    /// without the world-to-base and flange-to-tool mounting transforms.
    ///
    /// # Panics
    ///
    /// Panics if `q.len()` does not match the number of degrees of freedom.
    fn forward_flange(&self, q: &[f64]) -> Pose;

    /// Computes joint angles that bring the tool to the given world-frame pose,
    /// starting from the `previous` configuration and walking an interpolated
    /// Cartesian path towards the goal.
    fn inverse_continuing(&self, pose: &Pose, previous: &[f64])
        -> Result<Joints, UnreachableTarget>;

    /// Number of degrees of freedom (rows of the DH table).
    fn dof(&self) -> usize;
}

/// Returned when the solver walked the full interpolated Cartesian path but the
/// final pose still misses the goal by more than the acceptance tolerance. This
/// signals an unreachable (or orientation-infeasible) target; it must surface to
/// the caller instead of a silently wrong configuration.
#[derive(Debug, Clone)]
pub struct UnreachableTarget {
    /// Norm of the remaining linear error in meters.
    pub error_norm: f64,

    /// The acceptance tolerance that was exceeded.
    pub tolerance: f64,
}

impl fmt::Display for UnreachableTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "large position error after the final interpolation step ({:.4} > {:.4}), \
             check target reachability (position/orientation)",
            self.error_norm, self.tolerance
        )
    }
}

impl Error for UnreachableTarget {}
