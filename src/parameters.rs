//! Defines the robot model data structure: the DH table, the mounting transforms
//! and the mechanical-to-DH angle remapping.

use crate::kinematic_traits::Joints;
use nalgebra::Isometry3;

/// One row of the Denavit-Hartenberg table, describing the kinematic relation
/// between one revolute joint and the next. Fixed at robot model construction.
#[derive(Debug, Clone)]
pub struct DhLink {
    /// Name of the joint this row belongs to (for diagnostics only).
    pub label: String,

    /// Link offset d, the displacement along the previous z axis, in meters.
    pub d: f64,

    /// Link length a, the displacement along the rotated x axis, in meters.
    pub a: f64,

    /// Link twist alpha, the rotation about the rotated x axis, in radians.
    pub alpha: f64,
}

impl DhLink {
    pub fn new(label: &str, d: f64, a: f64, alpha: f64) -> Self {
        DhLink {
            label: label.to_string(),
            d,
            a,
            alpha,
        }
    }
}

/// Parameters of the kinematic model of the robot. See
/// [parameters_robots.rs](parameters_robots.rs) for concrete robot models.
///
/// The DH table and the mounting transforms are immutable for the lifetime of a
/// kinematics call; the solver never writes into this structure.
#[derive(Debug, Clone)]
pub struct Parameters {
    /// The DH table, one row per revolute joint, base outward.
    pub dh_table: Vec<DhLink>,

    /// Transformation from the world origin to the robot's base.
    pub base: Isometry3<f64>,

    /// Transformation from the flange (the last DH frame) to the tool center point.
    pub tool: Isometry3<f64>,

    /// Offsets subtracted from each mechanical joint angle to obtain the DH angle,
    /// adjusting the reference zero position. One value per joint.
    pub offsets: Vec<f64>,

    /// Specifies the direction of positive mechanical rotation relative to the DH
    /// convention for each joint. A value of `-1` reverses the rotation direction.
    pub sign_corrections: Vec<i8>,
}

impl Parameters {
    /// Degrees of freedom of the robot (number of rows in the DH table).
    pub fn dof(&self) -> usize {
        self.dh_table.len()
    }

    /// Converts mechanical joint angles (as reported by the drives) into DH angles
    /// used by the kinematic chain. Pure remapping, not part of the solve.
    ///
    /// # Panics
    ///
    /// Panics if `q_mech.len()` does not match the number of degrees of freedom.
    pub fn from_mech_to_dh(&self, q_mech: &[f64]) -> Joints {
        assert_eq!(q_mech.len(), self.dof(), "q length must equal DOF");
        (0..self.dof())
            .map(|i| q_mech[i] * self.sign_corrections[i] as f64 - self.offsets[i])
            .collect()
    }

    /// Converts DH joint angles back into mechanical angles. Inverse of
    /// [Parameters::from_mech_to_dh].
    ///
    /// # Panics
    ///
    /// Panics if `q_dh.len()` does not match the number of degrees of freedom.
    pub fn from_dh_to_mech(&self, q_dh: &[f64]) -> Joints {
        assert_eq!(q_dh.len(), self.dof(), "q length must equal DOF");
        (0..self.dof())
            // sign corrections are +/-1, so multiplying again undoes them
            .map(|i| (q_dh[i] + self.offsets[i]) * self.sign_corrections[i] as f64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn two_joint_parameters() -> Parameters {
        Parameters {
            dh_table: vec![
                DhLink::new("shoulder", 0.1, 0.0, PI / 2.0),
                DhLink::new("elbow", 0.0, 0.3, 0.0),
            ],
            base: Isometry3::identity(),
            tool: Isometry3::identity(),
            offsets: vec![PI / 2.0, -PI / 4.0],
            sign_corrections: vec![1, -1],
        }
    }

    #[test]
    fn test_mech_to_dh_applies_signs_and_offsets() {
        let parameters = two_joint_parameters();
        let dh = parameters.from_mech_to_dh(&[0.3, 0.2]);
        assert!((dh[0] - (0.3 - PI / 2.0)).abs() < 1e-12);
        assert!((dh[1] - (-0.2 + PI / 4.0)).abs() < 1e-12);
    }

    #[test]
    fn test_mech_dh_round_trip() {
        let parameters = two_joint_parameters();
        let q_mech = [0.7, -1.1];
        let back = parameters.from_dh_to_mech(&parameters.from_mech_to_dh(&q_mech));
        for i in 0..2 {
            assert!((back[i] - q_mech[i]).abs() < 1e-12);
        }
    }

    #[test]
    #[should_panic(expected = "q length must equal DOF")]
    fn test_wrong_length_panics() {
        let parameters = two_joint_parameters();
        let _ = parameters.from_mech_to_dh(&[0.0; 3]);
    }
}
