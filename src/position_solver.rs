//! Joints 1 to 3 from the wrist center: planar projection and the law of cosines on the
//! triangle joint 2, joint 3, wrist center.

use std::f64::consts::FRAC_PI_2;
use nalgebra::Vector3;
use crate::ik_error::IkError;
use crate::parameters::dh_kinematics::Parameters;

/// How far the cosine may leave [-1, 1] from rounding alone. Within it, the value is taken
/// as the bound (fully extended or fully folded arm).
pub const ACOS_TOLERANCE: f64 = 1e-9;

/// Triangle angles closer than this to 0 or 180° make the elbow branches coincide.
const DEGENERATE_TRIANGLE: f64 = 1e-6;

/// Wrist center closer than this to the base axis leaves J1 undetermined.
const SHOULDER_SINGULARITY: f64 = 1e-9;

/// Elbow branch of the triangle solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elbow {
    /// Principal acos values.
    Down,
    /// Triangle mirrored along the line from joint 2 to the wrist center.
    Up,
}

/// The triangle joint 2, joint 3, wrist center.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// Distance from the base axis to the wrist center, in the horizontal plane.
    pub floor_distance: f64,
    /// Side from joint 2 to the wrist center.
    pub c: f64,
    /// Angle at joint 2.
    pub tri_alpha: f64,
    /// Angle at joint 3.
    pub tri_gamma: f64,
    /// Elevation of the wrist center over the horizontal through joint 2.
    pub elevation: f64,
}

impl Triangle {
    /// Fully stretched or fully folded: both elbow branches are the same.
    pub fn is_degenerate(&self) -> bool {
        self.tri_alpha.sin().abs() < DEGENERATE_TRIANGLE && self.tri_gamma.sin().abs() < DEGENERATE_TRIANGLE
    }
}

/// Joints 1 to 3 of one branch.
#[derive(Debug, Clone, Copy)]
pub struct ArmSolution {
    pub theta1: f64,
    pub theta2: f64,
    pub theta3: f64,
    pub elbow: Elbow,
}

/// Arm geometry constants used by the position solve, computed once.
#[derive(Debug, Clone)]
pub struct PositionSolver {
    d1: f64,
    a1: f64,
    /// Joint 3 to wrist center, sqrt(d4² + a3²)
    side_a: f64,
    /// Joint 2 to joint 3, a2
    side_b: f64,
    /// Angle of the forearm drop, atan2(a3, d4)
    forearm_angle: f64,
    /// Joint angle constants of links 1 to 3
    theta_offsets: [f64; 3],
}

impl PositionSolver {
    pub fn new(parameters: &Parameters) -> Self {
        PositionSolver {
            d1: parameters.d1(),
            a1: parameters.a1(),
            side_a: parameters.d4().hypot(parameters.a3()),
            side_b: parameters.a2(),
            forearm_angle: f64::atan2(parameters.a3(), parameters.d4()),
            theta_offsets: [
                parameters.links[0].theta,
                parameters.links[1].theta,
                parameters.links[2].theta,
            ],
        }
    }

    /// Longest reach from joint 2 to the wrist center.
    pub fn max_reach(&self) -> f64 {
        self.side_a + self.side_b
    }

    /// Solve the triangle for the wrist center. Fails if the wrist center is out of reach.
    pub fn triangle(&self, wc: &Vector3<f64>) -> Result<Triangle, IkError> {
        let floor_distance = wc.x.hypot(wc.y);
        let horizontal = floor_distance - self.a1;
        let vertical = wc.z - self.d1;
        let c = horizontal.hypot(vertical);
        let (a, b) = (self.side_a, self.side_b);

        let tri_alpha = checked_acos((b * b + c * c - a * a) / (2.0 * b * c), "tri_alpha", c)?;
        let tri_gamma = checked_acos((a * a + b * b - c * c) / (2.0 * a * b), "tri_gamma", c)?;

        Ok(Triangle {
            floor_distance,
            c,
            tri_alpha,
            tri_gamma,
            elevation: f64::atan2(vertical, horizontal),
        })
    }

    /// Joints 1 to 3 for the wrist center, elbow down first. The elbow up branch is
    /// omitted when it is the same as the elbow down (degenerate triangle). If the wrist
    /// center is on the base axis, J1 keeps the previous value (or zero).
    pub fn solve(&self, wc: &Vector3<f64>, previous_theta1: Option<f64>) -> Result<Vec<ArmSolution>, IkError> {
        let triangle = self.triangle(wc)?;

        let theta1 = if triangle.floor_distance < SHOULDER_SINGULARITY {
            previous_theta1.unwrap_or(0.0)
        } else {
            f64::atan2(wc.y, wc.x) - self.theta_offsets[0]
        };

        let mut solutions = vec![self.branch(theta1, &triangle, Elbow::Down)];
        if !triangle.is_degenerate() {
            solutions.push(self.branch(theta1, &triangle, Elbow::Up));
        }
        Ok(solutions)
    }

    fn branch(&self, theta1: f64, triangle: &Triangle, elbow: Elbow) -> ArmSolution {
        let sign = match elbow {
            Elbow::Down => 1.0,
            Elbow::Up => -1.0,
        };
        // Joint 2 angle is measured from the vertical, joint 3 from the perpendicular to
        // the upper arm, corrected by the forearm drop.
        let theta2 = -sign * triangle.tri_alpha - triangle.elevation - self.theta_offsets[1];
        let theta3 = FRAC_PI_2 - sign * triangle.tri_gamma + self.forearm_angle - self.theta_offsets[2];
        ArmSolution { theta1, theta2, theta3, elbow }
    }
}

/// acos with explicit domain check. Values within ACOS_TOLERANCE outside [-1, 1] are clamped,
/// anything further away (or not finite) means the triangle cannot be built.
pub fn checked_acos(value: f64, quantity: &'static str, distance: f64) -> Result<f64, IkError> {
    if !value.is_finite() || value.abs() > 1.0 + ACOS_TOLERANCE {
        return Err(IkError::UnreachablePose { quantity, value, distance });
    }
    Ok(value.clamp(-1.0, 1.0).acos())
}
