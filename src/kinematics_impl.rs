use std::sync::OnceLock;
use nalgebra::Rotation3;

use crate::forward_chain::ForwardChain;
use crate::ik_error::IkError;
use crate::kinematic_traits::{Joints, Kinematics, Pose, Singularity, Solutions, J5, J6};
use crate::orientation_solver::{residual_rotation, OrientationSolver, SINGULARITY_THRESHOLD};
use crate::parameters::dh_kinematics::Parameters;
use crate::position_solver::PositionSolver;
use crate::utils::dh_kinematics::is_valid;
use crate::utils::{normalize_angle, transition_costs};
use crate::wrist_center::{chain_rotation, locate_wrist_center};

/// Closed-form geometric solver for arms with a spherical wrist, described by the
/// modified DH parameters. Everything that depends on the parameters only is computed
/// once in `new`; solving a pose only substitutes numbers.
#[derive(Debug, Clone)]
pub struct DhKinematics {
    parameters: Parameters,
    chain: ForwardChain,
    position: PositionSolver,
    orientation: OrientationSolver,
    tool_correction_inverse: Rotation3<f64>,
}

impl DhKinematics {
    /// Creates a new `DhKinematics` instance with the given parameters.
    pub fn new(parameters: Parameters) -> Self {
        DhKinematics {
            chain: ForwardChain::new(&parameters),
            position: PositionSolver::new(&parameters),
            orientation: OrientationSolver::new(&parameters),
            tool_correction_inverse: parameters.tool_correction.inverse(),
            parameters,
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Reach of the arm from the joint 2 axis to the wrist center.
    pub fn max_reach(&self) -> f64 {
        self.position.max_reach()
    }

    fn solve(&self, pose: &Pose, previous: Option<&Joints>) -> Result<Solutions, IkError> {
        let position = pose.translation.vector;
        let rotation = pose.rotation.coords;
        if !position.iter().chain(rotation.iter()).all(|v| v.is_finite()) {
            return Err(IkError::MalformedInput(format!("pose is not finite: {}", pose)));
        }

        let target = chain_rotation(pose, &self.tool_correction_inverse);
        let wc = locate_wrist_center(&position, &target, self.parameters.d7());

        let arms = self.position.solve(&wc, previous.map(|p| p[0]))?;
        let mut candidates: Solutions = Vec::with_capacity(4);
        for arm in arms {
            let r0_3 = self.chain.rotation_to_joint3(arm.theta1, arm.theta2, arm.theta3);
            let r3_6 = residual_rotation(&r0_3, &target);
            for wrist in self.orientation.solve(&r3_6, previous.map(|p| p[J6]))? {
                candidates.push([
                    arm.theta1, arm.theta2, arm.theta3,
                    wrist.theta4, wrist.theta5, wrist.theta6,
                ].map(normalize_angle));
            }
        }

        let mut solutions = finite_solutions(candidates)?;
        if let Some(previous) = previous {
            // Stable sort, equally distant candidates keep the default order
            solutions.sort_by(|a, b| {
                transition_costs(previous, a).total_cmp(&transition_costs(previous, b))
            });
        }
        Ok(solutions)
    }
}

/// Drop candidates with non-finite joints. Fails if none remain.
fn finite_solutions(candidates: Solutions) -> Result<Solutions, IkError> {
    let count = candidates.len();
    let solutions: Solutions = candidates.into_iter().filter(is_valid).collect();
    if solutions.is_empty() {
        return Err(IkError::NoFiniteSolution { candidates: count });
    }
    Ok(solutions)
}

impl Kinematics for DhKinematics {
    /// Candidates are ordered elbow down before elbow up, and within each, the wrist
    /// with non-negative J5 first.
    fn inverse(&self, pose: &Pose) -> Result<Solutions, IkError> {
        self.solve(pose, None)
    }

    fn inverse_continuing(&self, pose: &Pose, previous: &Joints) -> Result<Solutions, IkError> {
        self.solve(pose, Some(previous))
    }

    fn forward(&self, qs: &Joints) -> Pose {
        self.chain.end_effector(qs)
    }

    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; 6] {
        self.chain.joint_poses(qs)
    }

    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity> {
        let theta5 = qs[J5] + self.parameters.links[J5].theta;
        if theta5.sin().abs() >= SINGULARITY_THRESHOLD {
            None
        } else if theta5.cos() > 0.0 {
            Some(Singularity::WristStraight)
        } else {
            Some(Singularity::WristFolded)
        }
    }
}

/// KUKA KR210 solver shared by the whole process, built on first use.
pub fn kr210() -> &'static DhKinematics {
    static KR210: OnceLock<DhKinematics> = OnceLock::new();
    KR210.get_or_init(|| DhKinematics::new(Parameters::kuka_kr210()))
}
