use std::f64::consts::PI;

use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::kinematic_traits::{Joints, Pose, Solutions};
use crate::utils::normalize_angle;

#[cfg(feature = "allow_filesystem")]
use anyhow::{Context, Result};
#[cfg(feature = "allow_filesystem")]
use crate::parameters::dh_kinematics::Parameters;

/// Joints used to calibrate the KR210 model against the simulator.
pub const CALIBRATION_JOINTS: Joints = [-0.97, -0.39, 0.72, 1.10, -1.10, 0.0];

/// End-effector position for the calibration joints, meters.
pub const CALIBRATION_POSITION: [f64; 3] = [0.6189329998934395, -1.32886525988804, 1.4403272260792375];

/// End-effector orientation for the calibration joints, quaternion [x, y, z, w].
pub const CALIBRATION_QUATERNION: [f64; 4] =
    [0.1998938770117048, -0.46725135649285315, -0.6715227323403395, 0.5392363375543072];

/// Wrist center for the calibration pose.
pub const CALIBRATION_WRIST_CENTER: [f64; 3] = [0.7215085656711531, -1.0528261126482796, 1.368985495678806];

pub fn calibration_pose() -> Pose {
    let [x, y, z] = CALIBRATION_POSITION;
    let [qx, qy, qz, qw] = CALIBRATION_QUATERNION;
    Isometry3::from_parts(
        Translation3::new(x, y, z),
        UnitQuaternion::from_quaternion(Quaternion::new(qw, qx, qy, qz)),
    )
}

/// Check if `expected` exists within `solutions` within `tolerance` (radians),
/// accounting for 2π wrap.
///
/// Returns:
/// - `Some(index)` of the matching solution, or `None` if not found
pub fn found_joints_approx_equal(solutions: &Solutions, expected: &Joints, tolerance: f64) -> Option<usize> {
    solutions.iter().position(|solution| {
        solution.iter()
            .zip(expected.iter())
            .all(|(a, b)| normalize_angle(a - b).abs() <= tolerance)
    })
}

/// Reproducible random joint positions, inside the range where the wrist center stays in
/// front of the base and J5 is away from the singularity.
pub struct RandomJoints {
    rng: StdRng,
}

impl RandomJoints {
    pub fn new(seed: u64) -> Self {
        RandomJoints { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn sample(&mut self) -> Joints {
        let q5 = self.rng.gen_range(0.2..2.0);
        let sign = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        [
            self.rng.gen_range(-PI..PI),
            self.rng.gen_range(-0.3..1.0),
            self.rng.gen_range(-0.8..1.2),
            self.rng.gen_range(-PI..PI),
            sign * q5,
            self.rng.gen_range(-PI..PI),
        ]
    }
}

/// Print solutions with the expected joints for diagnostics of a failed case.
pub fn dump_case(expected: &Joints, solutions: &Solutions) {
    let row = |joints: &Joints| joints.iter()
        .map(|q| format!("{:7.2}", q.to_degrees()))
        .collect::<Vec<String>>()
        .join(" ");
    println!("Expected joints: [{}]", row(expected));
    println!("Solutions:");
    for (i, solution) in solutions.iter().enumerate() {
        println!("{}. [{}]", i, row(solution));
    }
    println!("---");
}

#[cfg(feature = "allow_filesystem")]
pub fn load_parameters(filename: &str) -> Result<Parameters> {
    Parameters::from_yaml_file(filename)
        .with_context(|| format!("Failed to load parameters from {}", filename))
}
