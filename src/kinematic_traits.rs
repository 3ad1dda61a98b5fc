extern crate nalgebra as na;

use na::Isometry3;
use crate::ik_error::IkError;

/// Pose is used a pose of the robot end-effector. It contains both Cartesian position and
/// rotation quaternion
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(1.0, 0.0, 0.0);
/// // The quaternion should be normalized to represent a valid rotation.
/// let rotation = UnitQuaternion::from_quaternion(na::Quaternion::new(1.0, 0.0, 0.0, 1.0).normalize());
/// let transform = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Rotation angles of the six joints, in radians.
pub type Joints = [f64; 6];

/// All joints at zero
pub const JOINTS_AT_ZERO: Joints = [0.0; 6];

/// Solver may return up to 4 solutions (elbow up or down, wrist normal or flipped).
/// Solutions are ordered, the preferred one first.
pub type Solutions = Vec<Joints>;

/// Index of the wrist joint that collapses J4 and J6 when near 0 or ±180°
pub const J5: usize = 4;
/// Index of the last joint
pub const J6: usize = 5;

/// Identifies the kinematic singularity the joint configuration is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Singularity {
    /// J5 is close to 0: the axes of J4 and J6 coincide, only J4 + J6 is determined.
    WristStraight,

    /// J5 is close to ±180°: the axes of J4 and J6 coincide, only J4 - J6 is determined.
    WristFolded,
}

pub trait Kinematics: Send + Sync {
    /// Find the joint positions that bring the end-effector into the given pose.
    /// Returns all analytic candidates, the preferred one first. Fails if the pose
    /// cannot be reached.
    fn inverse(&self, pose: &Pose) -> Result<Solutions, IkError>;

    /// Same as inverse, but the candidates are ordered by the proximity to the
    /// previous joint positions. In a wrist singularity, J6 keeps its previous value.
    fn inverse_continuing(&self, pose: &Pose, previous: &Joints) -> Result<Solutions, IkError>;

    /// Pose of the end-effector for the given joint positions.
    fn forward(&self, qs: &Joints) -> Pose;

    /// Poses of the frames after every joint (index 0 = after J1), the last one
    /// being the end-effector pose, identical to `forward`.
    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; 6];

    /// Detect the wrist singularity for the given joint positions.
    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity>;
}
