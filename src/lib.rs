//! Rust implementation of the closed-form geometric inverse kinematics for six-axis serial arms
//! with a spherical wrist, described by modified Denavit-Hartenberg parameters (like KUKA KR210).
//!
//! The problem is decoupled at the wrist center, the point where the axes of the last three
//! joints intersect. The wrist center is found by moving back from the end-effector along its
//! approach axis. Joints 1 to 3 then place the wrist center (planar projection and the law of
//! cosines on the triangle joint 2, joint 3, wrist center), and joints 4 to 6 produce the
//! residual rotation R3_6 = transpose(R0_3) * R0_6.
//!
//! # Features
//!
//! - All analytic candidates are returned: elbow down or up, wrist normal or flipped. Without
//!   other information, elbow down with non-negative J5 comes first.
//! - If the previous joint positions are provided, the candidates are sorted by proximity to
//!   them (closest first), which keeps a trajectory continuous.
//! - For the wrist singularity at J5 = 0° or J5 = ±180°, J6 keeps its previous value (or 0) and
//!   J4 takes the rest of the rotation, instead of unstable atan2 results.
//! - Poses out of reach are reported as errors naming the failed triangle angle; no NaN is
//!   ever returned.
//! - Batches of waypoints are solved in order, sequentially, as a trajectory, or in parallel.
//! - Parameters can be read from YAML files.
//!
//! # Parameters
//!
//! Seven links (six joints and the fixed tool frame), each with the twist angle, link length,
//! link offset and joint angle constant, plus the fixed tool correction rotation that maps the
//! DH tool frame to the frame in which the caller gives orientations. Fill out
//! `dh_kinematics::Parameters` or use a preset such as `Parameters::kuka_kr210()`.
//!
//! ```
//! use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics};
//! use rs_dh_kinematics::kinematics_impl::DhKinematics;
//! use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
//!
//! let robot = DhKinematics::new(Parameters::kuka_kr210());
//! let joints: Joints = [-0.97, -0.39, 0.72, 1.10, 1.10, 0.0];
//! let pose = robot.forward(&joints);
//! let solutions = robot.inverse(&pose).expect("pose is reachable");
//! assert!((solutions[0][1] - joints[1]).abs() < 1e-9);
//! ```

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;
pub mod parameter_error;

#[path = "utils/utils.rs"]
pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;
pub mod ik_error;

pub mod transform;
pub mod forward_chain;
pub mod wrist_center;
pub mod position_solver;
pub mod orientation_solver;

pub mod request;
pub mod batch;

#[cfg(test)]
mod tests;
