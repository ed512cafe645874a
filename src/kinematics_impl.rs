//! Implements the DH forward kinematics chain and the damped least squares
//! inverse kinematics that walks an interpolated Cartesian path to the goal.

use crate::cartesian::{CartesianInterpolator, Resolution};
use crate::jacobian::{Damping, Jacobian, damped_pseudo_inverse};
use crate::kinematic_traits::{Joints, Kinematics, Pose, UnreachableTarget};
use crate::parameters::Parameters;
use crate::utils::{angular_error, dh_matrix, is_valid, linear_error};
use nalgebra::{DVector, Isometry3};
use tracing::{debug, trace};

/// Configuration of the iterative solver. All values are defaults tuned for
/// arms of roughly one meter reach; a robot on a very different scale may need
/// different resolutions and tolerances.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Track orientation as well as position. When false, only the position
    /// rows of the Jacobian and the linear error drive the iteration.
    pub use_orientation: bool,

    /// Step gain applied to each correction, damping the linearized update to
    /// prevent overshoot.
    pub gain: f64,

    /// Iteration budget per interpolation waypoint.
    pub max_iter: usize,

    /// Error norm below which a waypoint iteration stops early.
    pub step_tolerance: f64,

    /// Acceptance bound on the linear error norm after the final waypoint.
    /// Exceeding it fails the whole solve.
    pub final_tolerance: f64,

    /// Resolution of the interpolated Cartesian path.
    pub resolution: Resolution,

    /// Damping strategy for the Jacobian pseudo-inverse.
    pub damping: Damping,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            use_orientation: true,
            gain: 0.8,
            max_iter: 50,
            step_tolerance: 1e-5,
            final_tolerance: 1e-2,
            resolution: Resolution::default(),
            damping: Damping::default(),
        }
    }
}

/// Kinematics of a serial arm described by a DH table. Holds the immutable
/// robot model and the solver configuration; all per-call state lives on the
/// stack of the call, so independent solves may run concurrently on separate
/// instances or behind a shared reference.
pub struct DhKinematics {
    parameters: Parameters,
    options: SolverOptions,
}

impl DhKinematics {
    /// Creates a new `DhKinematics` instance with the given parameters and
    /// default solver options.
    pub fn new(parameters: Parameters) -> Self {
        DhKinematics {
            parameters,
            options: SolverOptions::default(),
        }
    }

    /// Creates a new instance with explicit solver options.
    pub fn new_with_options(parameters: Parameters, options: SolverOptions) -> Self {
        DhKinematics {
            parameters,
            options,
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Iterates the damped Jacobian correction toward a single flange-frame
    /// target, starting from `q_seed`. Stops early once the error norm falls
    /// below the step tolerance, otherwise runs the full iteration budget and
    /// returns the configuration reached so far. Running out of iterations is
    /// not an error: the caller re-attempts from the returned configuration at
    /// the next, closer waypoint.
    ///
    /// # Panics
    ///
    /// Panics if `q_seed.len()` does not match the number of degrees of freedom.
    pub fn inverse_step(&self, q_seed: &[f64], flange_target: &Pose) -> Joints {
        // The caller's configuration is never mutated.
        let mut q: Joints = q_seed.to_vec();

        for iteration in 0..self.options.max_iter {
            let current = self.forward_flange(&q);
            let err_lin = linear_error(&current, flange_target);

            let error = if self.options.use_orientation {
                let err_ang = angular_error(&current, flange_target);
                DVector::from_column_slice(&[
                    err_lin.x, err_lin.y, err_lin.z, err_ang.x, err_ang.y, err_ang.z,
                ])
            } else {
                DVector::from_column_slice(&[err_lin.x, err_lin.y, err_lin.z])
            };

            if error.norm() < self.options.step_tolerance {
                trace!(iteration, "waypoint converged");
                return q;
            }

            let jacobian = Jacobian::new(&self.parameters, &q);
            let j = if self.options.use_orientation {
                jacobian.matrix().clone()
            } else {
                jacobian.linear_rows()
            };

            let correction = damped_pseudo_inverse(&j, &self.options.damping) * error;
            for (value, delta) in q.iter_mut().zip(correction.iter()) {
                *value += self.options.gain * delta;
            }
        }

        debug!("waypoint iteration budget exhausted");
        q
    }
}

impl Kinematics for DhKinematics {
    fn forward(&self, q: &[f64]) -> Pose {
        self.parameters.base * self.forward_flange(q) * self.parameters.tool
    }

    fn forward_flange(&self, q: &[f64]) -> Pose {
        assert_eq!(q.len(), self.parameters.dof(), "q length must equal DOF");
        self.parameters
            .dh_table
            .iter()
            .zip(q.iter())
            .fold(Isometry3::identity(), |transform, (link, &theta)| {
                transform * dh_matrix(link, theta)
            })
    }

    fn inverse_continuing(
        &self,
        pose: &Pose,
        previous: &[f64],
    ) -> Result<Joints, UnreachableTarget> {
        debug_assert!(is_valid(previous), "seed configuration must be finite");

        // The iteration runs in the base-to-flange frame; strip the mounting
        // transforms from the world-frame goal first.
        let flange_goal = self.parameters.base.inverse() * pose * self.parameters.tool.inverse();

        let mut q: Joints = previous.to_vec();
        let interpolator = CartesianInterpolator::new(
            &self.forward_flange(&q),
            &flange_goal,
            &self.options.resolution,
        );
        debug!(steps = interpolator.n_steps(), "interpolating Cartesian path");

        // The solver never jumps to the far goal; it walks the interpolated
        // path, re-converging at each waypoint from the previous result.
        for step in 0..=interpolator.n_steps() {
            let target = interpolator.pose_at(step);
            q = self.inverse_step(&q, &target);
        }

        let error_norm = linear_error(&self.forward(&q), pose).norm();
        if error_norm < self.options.final_tolerance {
            Ok(q)
        } else {
            Err(UnreachableTarget {
                error_norm,
                tolerance: self.options.final_tolerance,
            })
        }
    }

    fn dof(&self) -> usize {
        self.parameters.dof()
    }
}
