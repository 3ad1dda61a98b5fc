//! Locates the wrist center of the target pose

use nalgebra::{Rotation3, Vector3};
use crate::kinematic_traits::Pose;

/// Rotation of the DH tool frame for the target pose: the caller's orientation
/// with the tool correction removed.
pub fn chain_rotation(pose: &Pose, tool_correction_inverse: &Rotation3<f64>) -> Rotation3<f64> {
    pose.rotation.to_rotation_matrix() * tool_correction_inverse
}

/// Wrist center: the end-effector position moved back by d7 along the approach (z) axis
/// of the DH tool frame.
pub fn locate_wrist_center(position: &Vector3<f64>, chain_rotation: &Rotation3<f64>, d7: f64) -> Vector3<f64> {
    let approach: Vector3<f64> = chain_rotation.matrix().column(2).into_owned();
    position - approach * d7
}
