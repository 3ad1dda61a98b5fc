//! Helper functions

use std::f64::consts::PI;
use crate::kinematic_traits::{Joints, Solutions};
use nalgebra::{Isometry3, UnitQuaternion};

/// Checks the solution for validity. This is only internally needed as all returned
/// solutions are already checked.
pub(crate) mod dh_kinematics {
    use crate::kinematic_traits::Joints;

    /// Checks if all elements in the array are finite
    pub fn is_valid(qs: &Joints) -> bool {
        qs.iter().all(|&q| q.is_finite())
    }
}

/// Bring the angle into the range (-PI, PI]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(2.0 * PI);
    if wrapped > PI {
        wrapped - 2.0 * PI
    } else {
        wrapped
    }
}

/// Convert joints that are array of f64's in radians to
/// array of f32's in degrees
pub fn to_degrees(angles: &Joints) -> [f32; 6] {
    angles.map(|a| a.to_degrees() as f32)
}

/// Print joint values for all solutions, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_solutions(solutions: &Solutions) {
    if solutions.is_empty() {
        println!("No solutions");
    }
    for joints in solutions {
        dump_joints(joints);
    }
}

/// Print joint values, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_joints(joints: &Joints) {
    let mut row_str = String::new();
    for joint_idx in 0..6 {
        let computed = joints[joint_idx];
        row_str.push_str(&format!("{:5.2} ", computed.to_degrees()));
    }
    println!("[{}]", row_str.trim_end());
}

pub fn dump_pose(isometry: &Isometry3<f64>) {
    // Extract translation components
    let translation = isometry.translation.vector;

    // Extract rotation components
    let rotation: UnitQuaternion<f64> = isometry.rotation;

    // Print translation and rotation
    println!(
        "x: {:.5}, y: {:.5}, z: {:.5},  quat: {:.5},{:.5},{:.5},{:.5}",
        translation.x, translation.y, translation.z, rotation.i, rotation.j, rotation.k, rotation.w
    );
}

/// Allows to specify joint values in degrees (converts to radians)
#[allow(dead_code)]
pub fn as_radians(degrees: [i32; 6]) -> Joints {
    std::array::from_fn(|i| (degrees[i] as f64).to_radians())
}

/// formatting for YAML output
pub(crate) fn deg(x: &f64) -> String {
    if *x == 0.0 {
        return "0".to_string();
    }
    format!("deg({:.4})", x.to_degrees())
}

/// Calculates the transition cost between two sets of joint positions: the sum of
/// the joint rotations, each taken the short way around.
pub fn transition_costs(from: &Joints, to: &Joints) -> f64 {
    from.iter()
        .zip(to.iter())
        .map(|(a, b)| normalize_angle(a - b).abs())
        .sum()
}

pub fn assert_pose_eq(ta: &Isometry3<f64>, tb: &Isometry3<f64>,
                      distance_tolerance: f64, angular_tolerance: f64) -> bool {
    fn bad(ta: &Isometry3<f64>, tb: &Isometry3<f64>) {
        dump_pose(ta);
        dump_pose(tb);
    }

    let translation_distance = (ta.translation.vector - tb.translation.vector).norm();
    let angular_distance = ta.rotation.angle_to(&tb.rotation);

    if translation_distance.abs() > distance_tolerance {
        bad(ta, tb);
        panic!("Poses have too different translations");
    }

    if angular_distance.abs() > angular_tolerance {
        bad(ta, tb);
        panic!("Poses have too different angles");
    }
    true
}
