use crate::kinematic_traits::Joints;
use std::f64::consts::PI;

/// Joint limits of the robot, checked by callers after a solve completes. The
/// solver itself never enforces them.
#[derive(Clone)]
pub struct Constraints {
    /// Normalized lower limit. If more than upper limit, the range wraps-around through 0
    pub from: Vec<f64>,

    /// Normalized upper limit. If less than lower limit, the range wraps-around through 0
    pub to: Vec<f64>,
}

impl Constraints {
    /// # Panics
    ///
    /// Panics if the two limit vectors have different lengths.
    pub fn new(from: Vec<f64>, to: Vec<f64>) -> Self {
        assert_eq!(from.len(), to.len(), "limit vectors must have equal length");
        let two_pi = 2.0 * PI;
        let from_normalized = from.iter().map(|f| ((f % two_pi) + two_pi) % two_pi).collect();
        let to_normalized = to.iter().map(|t| ((t % two_pi) + two_pi) % two_pi).collect();

        Constraints {
            from: from_normalized,
            to: to_normalized,
        }
    }

    pub fn compliant(&self, angles: &[f64]) -> bool {
        let two_pi = 2.0 * PI;
        for i in 0..self.from.len() {
            if self.from[i] == self.to[i] {
                continue; // Joint without constraints, from == to
            }
            let angle = ((angles[i] % two_pi) + two_pi) % two_pi;
            if self.from[i] <= self.to[i] {
                if !(angle >= self.from[i] && angle <= self.to[i]) {
                    return false;
                }
            } else {
                if !(angle >= self.from[i] || angle <= self.to[i]) {
                    return false;
                }
            }
        }
        true
    }

    pub fn filter(&self, angles: &[Joints]) -> Vec<Joints> {
        angles
            .iter()
            .filter(|angle_array| self.compliant(angle_array))
            .cloned()
            .collect()
    }
}
