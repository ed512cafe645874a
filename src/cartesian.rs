//! Cartesian interpolation between two poses: linear blend for the position,
//! spherical blend (SLERP) for the orientation.

use crate::kinematic_traits::Pose;
use crate::utils::distance;
use nalgebra::{Isometry3, UnitQuaternion, Vector3};

/// Resolution of the interpolated path. No interpolation step moves the tool
/// further than `step_m` in translation or `step_rad` in rotation, which keeps
/// every per-step solve inside the valid radius of the solver's linearization.
#[derive(Debug, Clone, Copy)]
pub struct Resolution {
    /// Step size in meters.
    pub step_m: f64,

    /// Step size in radians.
    pub step_rad: f64,
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution {
            step_m: 0.01,
            step_rad: 0.05,
        }
    }
}

/// Precomputed interpolation between a start and a goal pose.
///
/// This is a value object created once per inverse kinematics call and dropped
/// when the call completes. It holds no hidden mutable state, so independent
/// solves can each carry their own instance; it is not meant to be shared
/// between concurrent solves, and changing the goal requires building a new one.
pub struct CartesianInterpolator {
    t_start: Vector3<f64>,
    t_final: Vector3<f64>,
    r_start: UnitQuaternion<f64>,
    r_final: UnitQuaternion<f64>,
    n_steps: usize,
}

impl CartesianInterpolator {
    /// Prepares interpolation from `start` to `final_pose`.
    ///
    /// The step count is the smallest integer keeping both the per-step
    /// translation within `resolution.step_m` and the per-step rotation (geodesic
    /// angle between the bracketing rotations) within `resolution.step_rad`.
    /// A step count of zero means the two poses coincide.
    pub fn new(start: &Pose, final_pose: &Pose, resolution: &Resolution) -> Self {
        let t_start = start.translation.vector;
        let t_final = final_pose.translation.vector;

        let translation_steps = distance(&t_start, &t_final) / resolution.step_m;
        let rotation_steps = start.rotation.angle_to(&final_pose.rotation) / resolution.step_rad;
        let n_steps = translation_steps.max(rotation_steps).ceil() as usize;

        CartesianInterpolator {
            t_start,
            t_final,
            r_start: start.rotation,
            r_final: final_pose.rotation,
            n_steps,
        }
    }

    /// Total number of steps; the valid step indices are `0..=n_steps`.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Computes the Cartesian pose setpoint for the given step index.
    ///
    /// `pose_at(0)` reproduces the start pose and `pose_at(n_steps)` the goal
    /// pose. When the step count is zero the blend parameter is pinned to 1.0,
    /// returning the goal (equal to the start) without dividing by zero.
    pub fn pose_at(&self, step: usize) -> Pose {
        debug_assert!(step <= self.n_steps, "step index out of range");
        let s = if self.n_steps == 0 {
            1.0
        } else {
            step as f64 / self.n_steps as f64
        };

        let translation = (1.0 - s) * self.t_start + s * self.t_final;
        let rotation = self.r_start.slerp(&self.r_final, s);
        Isometry3::from_parts(translation.into(), rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Translation3;

    fn pose(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Pose {
        Isometry3::from_parts(
            Translation3::new(x, y, z),
            UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        )
    }

    #[test]
    fn test_boundary_steps_reproduce_endpoints() {
        let start = pose(0.1, -0.2, 0.3, 0.1, 0.0, 0.4);
        let goal = pose(0.4, 0.1, 0.0, -0.2, 0.3, 0.9);
        let interpolator = CartesianInterpolator::new(&start, &goal, &Resolution::default());

        let first = interpolator.pose_at(0);
        let last = interpolator.pose_at(interpolator.n_steps());
        assert!((first.translation.vector - start.translation.vector).norm() < 1e-12);
        assert!(first.rotation.angle_to(&start.rotation) < 1e-12);
        assert!((last.translation.vector - goal.translation.vector).norm() < 1e-12);
        assert!(last.rotation.angle_to(&goal.rotation) < 1e-12);
    }

    #[test]
    fn test_pure_translation_step_count() {
        // 0.5 m at 0.01 m per step: exactly 50 steps, and 49 would not fit.
        let start = pose(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let goal = pose(0.5, 0.0, 0.0, 0.0, 0.0, 0.0);
        let resolution = Resolution::default();
        let interpolator = CartesianInterpolator::new(&start, &goal, &resolution);
        assert_eq!(interpolator.n_steps(), 50);
        assert!(0.5 / (interpolator.n_steps() - 1) as f64 > resolution.step_m);
    }

    #[test]
    fn test_pure_rotation_step_count() {
        // 0.48 rad at 0.05 rad per step needs 10 steps, 9 would not fit.
        let start = pose(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let goal = pose(0.0, 0.0, 0.0, 0.0, 0.0, 0.48);
        let interpolator = CartesianInterpolator::new(&start, &goal, &Resolution::default());
        assert_eq!(interpolator.n_steps(), 10);
    }

    #[test]
    fn test_zero_motion_has_no_steps() {
        let start = pose(0.2, 0.1, -0.3, 0.0, 0.5, 0.0);
        let interpolator = CartesianInterpolator::new(&start, &start, &Resolution::default());
        assert_eq!(interpolator.n_steps(), 0);

        // s is pinned to 1.0, so even step 0 yields the (identical) goal.
        let only = interpolator.pose_at(0);
        assert!((only.translation.vector - start.translation.vector).norm() < 1e-12);
        assert!(only.rotation.angle_to(&start.rotation) < 1e-12);
    }

    #[test]
    fn test_steps_stay_within_resolution() {
        let start = pose(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let goal = pose(0.3, -0.2, 0.15, 0.4, -0.3, 0.8);
        let resolution = Resolution::default();
        let interpolator = CartesianInterpolator::new(&start, &goal, &resolution);
        assert!(interpolator.n_steps() > 0);

        let mut previous = interpolator.pose_at(0);
        for step in 1..=interpolator.n_steps() {
            let current = interpolator.pose_at(step);
            let step_translation =
                (current.translation.vector - previous.translation.vector).norm();
            let step_rotation = previous.rotation.angle_to(&current.rotation);
            assert!(step_translation <= resolution.step_m + 1e-12);
            assert!(step_rotation <= resolution.step_rad + 1e-12);
            previous = current;
        }
    }
}
