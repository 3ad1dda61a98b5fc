//! Records crossing the boundary of the solver: end-effector poses as they come in a
//! request (position and quaternion), and the conversions to and from roll, pitch, yaw.

use nalgebra::{Quaternion, Translation3, UnitQuaternion};
use crate::ik_error::IkError;
use crate::kinematic_traits::Pose;

/// How far the quaternion norm may differ from 1 before the pose is rejected.
pub const QUATERNION_NORM_TOLERANCE: f64 = 1e-6;

/// End-effector pose as received: position and orientation quaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseRecord {
    /// Position in meters: [x, y, z]
    pub position: [f64; 3],
    /// Orientation quaternion in [x, y, z, w] ordering
    pub orientation: [f64; 4],
}

impl PoseRecord {
    pub fn new(position: [f64; 3], orientation: [f64; 4]) -> Self {
        PoseRecord { position, orientation }
    }

    /// Validate the record and convert it into the pose. Rejects non-finite values and
    /// quaternions that are not normalized.
    pub fn to_pose(&self) -> Result<Pose, IkError> {
        if !self.position.iter().all(|v| v.is_finite()) {
            return Err(IkError::MalformedInput(format!("position is not finite: {:?}", self.position)));
        }
        if !self.orientation.iter().all(|v| v.is_finite()) {
            return Err(IkError::MalformedInput(format!("orientation is not finite: {:?}", self.orientation)));
        }
        let [x, y, z, w] = self.orientation;
        let quaternion = Quaternion::new(w, x, y, z);
        let norm = quaternion.norm();
        if (norm - 1.0).abs() > QUATERNION_NORM_TOLERANCE {
            return Err(IkError::MalformedInput(format!(
                "orientation quaternion is not normalized, norm {}", norm
            )));
        }
        let [px, py, pz] = self.position;
        Ok(Pose::from_parts(
            Translation3::new(px, py, pz),
            UnitQuaternion::from_quaternion(quaternion),
        ))
    }

    pub fn from_pose(pose: &Pose) -> Self {
        let t = pose.translation.vector;
        let q = pose.rotation.quaternion();
        PoseRecord {
            position: [t.x, t.y, t.z],
            orientation: [q.i, q.j, q.k, q.w],
        }
    }
}

/// Roll, pitch and yaw of the quaternion [x, y, z, w], such that the rotation is
/// Rz(yaw) * Ry(pitch) * Rx(roll).
pub fn euler_from_quaternion(orientation: &[f64; 4]) -> (f64, f64, f64) {
    let [x, y, z, w] = *orientation;
    UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z)).euler_angles()
}

/// Pose from position and roll, pitch, yaw (rotation Rz(yaw) * Ry(pitch) * Rx(roll)).
pub fn pose_from_rpy(position: [f64; 3], roll: f64, pitch: f64, yaw: f64) -> Pose {
    Pose::from_parts(
        Translation3::new(position[0], position[1], position[2]),
        UnitQuaternion::from_euler_angles(roll, pitch, yaw),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Rotation3, Vector3};

    #[test]
    fn test_valid_record() {
        let half = std::f64::consts::FRAC_1_SQRT_2;
        let record = PoseRecord::new([1.0, 2.0, 3.0], [0.0, 0.0, half, half]);
        let pose = record.to_pose().expect("valid record");
        assert_eq!(pose.translation.vector, Vector3::new(1.0, 2.0, 3.0));
        assert!((pose.rotation.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        let back = PoseRecord::from_pose(&pose);
        assert!((back.orientation[2] - half).abs() < 1e-12);
    }

    #[test]
    fn test_not_normalized() {
        let record = PoseRecord::new([1.0, 2.0, 3.0], [0.0, 0.0, 1.0, 1.0]);
        assert!(matches!(record.to_pose(), Err(IkError::MalformedInput(_))));
    }

    #[test]
    fn test_not_finite() {
        let record = PoseRecord::new([f64::NAN, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0]);
        assert!(matches!(record.to_pose(), Err(IkError::MalformedInput(_))));
        let record = PoseRecord::new([1.0, 2.0, 3.0], [0.0, f64::INFINITY, 0.0, 1.0]);
        assert!(matches!(record.to_pose(), Err(IkError::MalformedInput(_))));
    }

    #[test]
    fn test_rpy_composition_order() {
        let (roll, pitch, yaw) = (0.3, -0.4, 1.2);
        let pose = pose_from_rpy([0.0; 3], roll, pitch, yaw);
        let expected = Rotation3::from_axis_angle(&Vector3::z_axis(), yaw)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), pitch)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), roll);
        let actual = pose.rotation.to_rotation_matrix();
        assert!((actual.matrix() - expected.matrix()).abs().max() < 1e-12);

        let record = PoseRecord::from_pose(&pose);
        let (r, p, y) = euler_from_quaternion(&record.orientation);
        assert!((r - roll).abs() < 1e-12 && (p - pitch).abs() < 1e-12 && (y - yaw).abs() < 1e-12);
    }
}
