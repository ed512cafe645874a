use anyhow::{Context, Result};
use nalgebra::Vector3;
use rs_dh_kinematics::constraints::Constraints;
use rs_dh_kinematics::kinematic_traits::Kinematics;
use rs_dh_kinematics::kinematics_impl::DhKinematics;
use rs_dh_kinematics::parameters::Parameters;
use rs_dh_kinematics::utils::dump_joints;
use std::f64::consts::PI;

/// Usage example.
fn main() -> Result<()> {
    let robot = DhKinematics::new(Parameters::puma_560());

    // Joint angles as the drives report them, at the nominal dextrous pose.
    let q_init_mech = [0.0, PI / 4.0, PI, 0.0, PI / 4.0, 0.0];
    println!("Initial mechanical joint angles:");
    dump_joints(&q_init_mech);

    let q_init = robot.parameters().from_mech_to_dh(&q_init_mech);
    println!("Initial DH joint angles:");
    dump_joints(&q_init);

    let start = robot.forward(&q_init);
    println!("Start pose:{}", start.to_homogeneous());

    // Move the tool 10 cm down, keeping the orientation.
    let mut goal = start;
    goal.translation.vector += Vector3::new(0.0, 0.0, -0.1);
    println!("Goal pose:{}", goal.to_homogeneous());

    let q_final = robot
        .inverse_continuing(&goal, &q_init)
        .context("solving inverse kinematics for the displaced goal")?;
    println!("Final DH joint angles:");
    dump_joints(&q_final);

    let reached = robot.forward(&q_final);
    println!(
        "Remaining linear error: {:.6} m",
        (goal.translation.vector - reached.translation.vector).norm()
    );

    // Back to mechanical angles, then check the drives can take them.
    let q_final_mech = robot.parameters().from_dh_to_mech(&q_final);
    println!("Final mechanical joint angles:");
    dump_joints(&q_final_mech);

    let limits = Constraints::new(
        vec![-2.9, -1.9, -0.9, -3.1, -1.8, -3.1],
        vec![2.9, 1.9, 3.9, 3.1, 1.8, 3.1],
    );
    if limits.compliant(&q_final_mech) {
        println!("The solution is within the joint limits");
    } else {
        println!("The solution exceeds the joint limits");
    }

    Ok(())
}
