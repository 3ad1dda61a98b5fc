//! Composition of the link transforms along the arm

use nalgebra::{Isometry3, Rotation3, Translation3, UnitQuaternion};
use crate::kinematic_traits::{Joints, Pose};
use crate::parameters::dh_kinematics::{Parameters, LINKS};
use crate::transform::dh_rotation;

/// Link with the twist sine and cosine computed once.
#[derive(Debug, Clone, Copy)]
struct PrecomputedLink {
    sin_alpha: f64,
    cos_alpha: f64,
    a: f64,
    d: f64,
    theta: f64,
}

impl PrecomputedLink {
    fn rotation(&self, q: f64) -> Rotation3<f64> {
        dh_rotation(self.sin_alpha, self.cos_alpha, q + self.theta)
    }

    fn transform(&self, q: f64) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::new(self.a, -self.sin_alpha * self.d, self.cos_alpha * self.d),
            UnitQuaternion::from_rotation_matrix(&self.rotation(q)),
        )
    }
}

/// Forward chain of the arm, built once per robot model.
#[derive(Debug, Clone)]
pub struct ForwardChain {
    links: [PrecomputedLink; LINKS],
    tool_correction: UnitQuaternion<f64>,
}

impl ForwardChain {
    pub fn new(parameters: &Parameters) -> Self {
        let links = parameters.links.map(|link| {
            let (sin_alpha, cos_alpha) = link.twist.sin_cos();
            PrecomputedLink { sin_alpha, cos_alpha, a: link.length, d: link.offset, theta: link.theta }
        });
        ForwardChain {
            links,
            tool_correction: UnitQuaternion::from_rotation_matrix(&parameters.tool_correction),
        }
    }

    /// Rotation from the base to the frame of joint 3 (R0_3), used to decouple the wrist.
    pub fn rotation_to_joint3(&self, q1: f64, q2: f64, q3: f64) -> Rotation3<f64> {
        self.links[0].rotation(q1) * self.links[1].rotation(q2) * self.links[2].rotation(q3)
    }

    /// Transform from the base to the frame of joint 3 (T0_3).
    pub fn to_joint3(&self, q1: f64, q2: f64, q3: f64) -> Isometry3<f64> {
        self.links[0].transform(q1) * self.links[1].transform(q2) * self.links[2].transform(q3)
    }

    /// Poses of the frames of joints 1 to 5, and of the corrected end-effector as the last.
    pub fn joint_poses(&self, qs: &Joints) -> [Pose; 6] {
        let mut poses = [Pose::identity(); 6];
        let mut pose = Pose::identity();
        for (i, q) in qs.iter().enumerate() {
            pose *= self.links[i].transform(*q);
            poses[i] = pose;
        }
        poses[5] = self.with_tool(&poses[5]);
        poses
    }

    /// Pose of the end-effector as seen by the caller (tool frame, corrected).
    pub fn end_effector(&self, qs: &Joints) -> Pose {
        let mut pose = Pose::identity();
        for (i, q) in qs.iter().enumerate() {
            pose *= self.links[i].transform(*q);
        }
        self.with_tool(&pose)
    }

    fn with_tool(&self, flange: &Pose) -> Pose {
        let mut tool = flange * self.links[6].transform(0.0);
        tool.rotation *= self.tool_correction;
        tool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::link_transform;
    use nalgebra::{Matrix3, Vector3};

    #[test]
    fn test_zero_pose() {
        // All joints at zero: the arm is stretched forward, gripper level.
        let chain = ForwardChain::new(&Parameters::kuka_kr210());
        let pose = chain.end_effector(&[0.0; 6]);
        let expected = Vector3::new(0.35 + 1.5 + 0.303, 0.0, 0.75 + 1.25 - 0.054);
        assert!((pose.translation.vector - expected).norm() < 1e-9);
        assert!(pose.rotation.angle() < 1e-9);
    }

    #[test]
    fn test_chain_matches_link_transforms() {
        let parameters = Parameters::kuka_kr210();
        let chain = ForwardChain::new(&parameters);
        let qs = [0.3, -0.2, 0.5, 1.0, -0.7, 0.25];

        let mut expected = Pose::identity();
        for i in 0..6 {
            expected *= link_transform(&parameters.links[i], qs[i]);
        }
        expected *= link_transform(&parameters.links[6], 0.0);
        let correction = UnitQuaternion::from_rotation_matrix(&parameters.tool_correction);
        expected.rotation *= correction;

        let actual = chain.end_effector(&qs);
        assert!((expected.to_homogeneous() - actual.to_homogeneous()).abs().max() < 1e-12);

        let poses = chain.joint_poses(&qs);
        assert!((poses[5].to_homogeneous() - actual.to_homogeneous()).abs().max() < 1e-12);
    }

    #[test]
    fn test_rotation_to_joint3_matches_transform() {
        let chain = ForwardChain::new(&Parameters::kuka_kr210());
        let rotation = chain.rotation_to_joint3(-0.97, -0.39, 0.72).into_inner();
        let transform = chain.to_joint3(-0.97, -0.39, 0.72).rotation.to_rotation_matrix().into_inner();
        assert!((rotation - transform).abs().max() < 1e-12);
        assert!((rotation.transpose() * rotation - Matrix3::identity()).abs().max() < 1e-12);
    }
}
