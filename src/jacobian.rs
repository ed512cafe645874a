//! Geometric Jacobian of the DH chain and the damped least squares pseudo-inverse.

use crate::parameters::Parameters;
use crate::utils::dh_matrix;
use nalgebra::linalg::SVD;
use nalgebra::{DMatrix, Isometry3, UnitQuaternion, Vector3};

/// Default damping constant for the pseudo-inverse.
pub const DEFAULT_LAMBDA: f64 = 0.001;

/// Damping strategy for [damped_pseudo_inverse]. The weighted variant penalizes
/// joint velocities non-uniformly and is the integration point for external
/// limit-avoidance policies; the solver itself treats both variants uniformly.
#[derive(Debug, Clone)]
pub enum Damping {
    /// Regularize with `lambda * I`.
    Uniform { lambda: f64 },

    /// Regularize with `lambda * W` where `W` is an N x N weight matrix.
    Weighted { lambda: f64, weights: DMatrix<f64> },
}

impl Default for Damping {
    fn default() -> Self {
        Damping::Uniform {
            lambda: DEFAULT_LAMBDA,
        }
    }
}

/// Struct representing the geometric Jacobian of the arm.
///
/// The Jacobian matrix maps the joint velocities to the end-effector velocities.
/// Each column corresponds to a joint; rows 0..3 are the linear and rows 3..6 the
/// angular velocity components. It depends on the current configuration and must
/// be recomputed whenever the joint angles change.
pub struct Jacobian {
    matrix: DMatrix<f64>,
}

impl Jacobian {
    /// Computes the 6xN base-frame geometric Jacobian for the given configuration.
    ///
    /// Column i is built from the chain of intermediate DH transforms: the angular
    /// part is the z axis of joint i's parent frame expressed in the base frame,
    /// and the linear part is that axis crossed with the vector from the joint
    /// origin to the flange origin.
    ///
    /// # Panics
    ///
    /// Panics if `q.len()` does not match the number of degrees of freedom.
    pub fn new(parameters: &Parameters, q: &[f64]) -> Self {
        assert_eq!(q.len(), parameters.dof(), "q length must equal DOF");
        let n = parameters.dof();

        // Joint i rotates about the z axis of the frame before its link transform.
        let mut transform = Isometry3::identity();
        let mut axes = Vec::with_capacity(n);
        let mut origins = Vec::with_capacity(n);
        for (link, &theta) in parameters.dh_table.iter().zip(q.iter()) {
            axes.push(transform.rotation * Vector3::z());
            origins.push(transform.translation.vector);
            transform *= dh_matrix(link, theta);
        }
        let flange = transform.translation.vector;

        let mut matrix = DMatrix::zeros(6, n);
        for i in 0..n {
            let linear = axes[i].cross(&(flange - origins[i]));
            matrix.fixed_view_mut::<3, 1>(0, i).copy_from(&linear);
            matrix.fixed_view_mut::<3, 1>(3, i).copy_from(&axes[i]);
        }
        Jacobian { matrix }
    }

    /// The full 6xN matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// The position part only (rows 0..3), used when orientation is not tracked.
    pub fn linear_rows(&self) -> DMatrix<f64> {
        self.matrix.rows(0, 3).clone_owned()
    }

    /// Re-expresses the Jacobian in the tool frame by rotating the linear and the
    /// angular 3-block of every column with the inverse of the current
    /// base-to-tool rotation.
    pub fn in_tool_frame(&self, base_to_tool: &UnitQuaternion<f64>) -> Jacobian {
        let rotation = base_to_tool.inverse();
        let n = self.matrix.ncols();
        let mut matrix = DMatrix::zeros(6, n);
        for i in 0..n {
            let linear: Vector3<f64> = self.matrix.fixed_view::<3, 1>(0, i).clone_owned();
            let angular: Vector3<f64> = self.matrix.fixed_view::<3, 1>(3, i).clone_owned();
            matrix
                .fixed_view_mut::<3, 1>(0, i)
                .copy_from(&(rotation * linear));
            matrix
                .fixed_view_mut::<3, 1>(3, i)
                .copy_from(&(rotation * angular));
        }
        Jacobian { matrix }
    }

    /// Damped least squares right pseudo-inverse of the full 6xN matrix.
    /// See [damped_pseudo_inverse].
    pub fn damped_pseudo_inverse(&self, damping: &Damping) -> DMatrix<f64> {
        damped_pseudo_inverse(&self.matrix, damping)
    }
}

/// Computes the damped least squares right pseudo-inverse `(JᵀJ + λI)⁻¹ Jᵀ`
/// (or `(JᵀJ + λW)⁻¹ Jᵀ` for weighted damping).
///
/// The damped inverse is taken on the N x N joint-space Gram matrix and then
/// post-multiplied by `Jᵀ`. With positive damping the regularized Gram matrix is
/// positive definite, so near-singular configurations yield a bounded (if
/// slightly biased) solution instead of a failure; numerical degeneracy is never
/// surfaced as an error.
///
/// # Panics
///
/// Panics if a weighted damping matrix does not match the joint-space dimension.
pub fn damped_pseudo_inverse(jacobian: &DMatrix<f64>, damping: &Damping) -> DMatrix<f64> {
    let jt = jacobian.transpose();
    let gram = &jt * jacobian;
    let n = gram.nrows();

    let regularized = match damping {
        Damping::Uniform { lambda } => gram + DMatrix::identity(n, n) * *lambda,
        Damping::Weighted { lambda, weights } => {
            assert_eq!(weights.nrows(), n, "weight matrix must be N x N");
            assert_eq!(weights.ncols(), n, "weight matrix must be N x N");
            gram + weights * *lambda
        }
    };

    match regularized.clone().try_inverse() {
        Some(inverse) => inverse * jt,
        None => {
            // Only reachable with zero damping at a singular configuration.
            let svd = SVD::new(regularized, true, true);
            match svd.pseudo_inverse(f64::EPSILON) {
                Ok(pseudo) => pseudo * jt,
                // pseudo_inverse can only fail for a negative cutoff; a zero
                // update stalls the caller instead of propagating NaNs.
                Err(_) => DMatrix::zeros(n, jacobian.nrows()),
            }
        }
    }
}
