use anyhow::{Context, Result};
use clap::Parser;
use rs_dh_kinematics::batch::{solve_batch, solve_trajectory};
use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics, Pose};
use rs_dh_kinematics::kinematics_impl::DhKinematics;
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::utils::{dump_joints, dump_pose, dump_solutions};

/// Solve a few waypoints with the closed-form inverse kinematics.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file with the DH parameters. KUKA KR210 is used if not given.
    #[arg(short, long)]
    parameters: Option<String>,
}

/// Usage example.
fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let parameters = match &args.parameters {
        Some(path) => Parameters::from_yaml_file(path)
            .with_context(|| format!("Failed to load parameters from {}", path))?,
        None => Parameters::kuka_kr210(),
    };
    println!("Parameters:\n{}", parameters.to_yaml());
    let robot = DhKinematics::new(parameters);

    let joints: Joints = [-0.97, -0.39, 0.72, 1.10, -1.10, 0.0];
    println!("Calibration joints:");
    dump_joints(&joints);
    let pose: Pose = robot.forward(&joints);
    dump_pose(&pose);

    println!("All candidates, preferred first (J5 comes back positive, wrist flipped):");
    dump_solutions(&robot.inverse(&pose)?);

    println!("Candidates when continuing from the calibration joints:");
    dump_solutions(&robot.inverse_continuing(&pose, &joints)?);

    println!("Joints with singularity J5 = 0, J4 and J6 only determined as a sum:");
    let singular: Joints = [0.0, 0.1, 0.2, 0.3, 0.0, 0.5];
    dump_solutions(&robot.inverse(&robot.forward(&singular))?);

    // A short trajectory with one waypoint far out of reach
    let mut waypoints: Vec<Pose> = (0..5)
        .map(|i| robot.forward(&[-0.97 + 0.1 * i as f64, -0.39, 0.72, 1.10, -1.10, 0.0]))
        .collect();
    waypoints[2].translation.vector.x += 10.0;

    println!("Batch, waypoints solved independently:");
    for result in solve_batch(&robot, &waypoints)? {
        match result {
            Ok(joints) => dump_joints(&joints),
            Err(err) => println!("{}", err),
        }
    }

    println!("Trajectory, continuing from the calibration joints:");
    for result in solve_trajectory(&robot, &waypoints, Some(&joints))? {
        match result {
            Ok(joints) => dump_joints(&joints),
            Err(err) => println!("{}", err),
        }
    }
    Ok(())
}
