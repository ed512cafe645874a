//! Hardcoded DH tables for a few robots

use crate::parameters::{DhLink, Parameters};
use nalgebra::Isometry3;
use std::f64::consts::FRAC_PI_2;

#[allow(dead_code)]
impl Parameters {
    /// The classic Unimation PUMA 560, standard DH convention (Corke's table).
    /// Mounted at the world origin with no tool; set `base` and `tool` after
    /// construction if the robot stands on a pedestal or carries an end-effector.
    pub fn puma_560() -> Self {
        Parameters {
            dh_table: vec![
                DhLink::new("waist", 0.0, 0.0, FRAC_PI_2),
                DhLink::new("shoulder", 0.0, 0.4318, 0.0),
                DhLink::new("elbow", 0.15005, 0.0203, -FRAC_PI_2),
                DhLink::new("wrist_roll", 0.4318, 0.0, FRAC_PI_2),
                DhLink::new("wrist_pitch", 0.0, 0.0, -FRAC_PI_2),
                DhLink::new("flange", 0.0, 0.0, 0.0),
            ],
            base: Isometry3::identity(),
            tool: Isometry3::identity(),
            offsets: vec![0.0; 6],
            sign_corrections: vec![1; 6],
        }
    }

    /// A planar arm with two unit-length links in the xy plane. Too simple for a
    /// real cell, but the workspace is easy to reason about; used throughout the
    /// test suite.
    pub fn planar_two_link() -> Self {
        Parameters {
            dh_table: vec![
                DhLink::new("shoulder", 0.0, 1.0, 0.0),
                DhLink::new("elbow", 0.0, 1.0, 0.0),
            ],
            base: Isometry3::identity(),
            tool: Isometry3::identity(),
            offsets: vec![0.0; 2],
            sign_corrections: vec![1; 2],
        }
    }
}
