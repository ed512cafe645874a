//! Rust implementation of forward and inverse kinematic solutions for serial
//! arms described by Denavit-Hartenberg tables.
//!
//! The forward chain composes one matrix per joint following the standard DH
//! convention (`Rz(theta) * Tz(d) * Tx(a) * Rx(alpha)`) and applies the fixed
//! world-to-base and flange-to-tool mounting transforms. The inverse solver is
//! iterative: it corrects the configuration with a damped least squares
//! pseudo-inverse of the geometric Jacobian, and instead of jumping straight to
//! the goal it walks a Cartesian path interpolated between the current pose and
//! the goal (linear blend for position, SLERP for orientation), re-converging at
//! every waypoint. Bounded step sizes keep each correction inside the valid
//! radius of the linearization, so the solver stays stable across long moves and
//! near kinematic singularities.
//!
//! # Features
//!
//! - Works for any number of revolute degrees of freedom; the chain is defined
//!   by the rows of the DH table alone.
//! - Forward kinematics to the flange, or to the tool center point in the world
//!   frame through the mounting transforms.
//! - Geometric Jacobian in the base or tool frame, and a damped least squares
//!   pseudo-inverse with uniform or weighted damping.
//! - Unreachable goals surface as errors instead of silently wrong joint angles.
//! - Solver gains, iteration budgets, tolerances and path resolution are
//!   configurable; the defaults suit arms of roughly one meter reach.
//! - Joint angles can be checked against constraints, including ranges that
//!   wrap around through zero.
//! - Mechanical-to-DH angle remapping for drives whose zero position or
//!   rotation direction differs from the DH convention.
//!
//! To use the library, fill out a [parameters::Parameters] data structure
//! (or start from a model in [parameters_robots](parameters_robots)) and hand it
//! to [kinematics_impl::DhKinematics]. The binary in `main.rs` walks through a
//! complete solve.

pub mod parameters;
pub mod parameters_robots;

pub mod utils;

pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod constraints;

pub mod jacobian;

pub mod cartesian;
