//! Joints 4 to 6 from the residual rotation of the spherical wrist.

use std::f64::consts::PI;
use nalgebra::{Matrix3, Rotation3};
use crate::ik_error::IkError;
use crate::parameters::dh_kinematics::Parameters;
use crate::position_solver::ACOS_TOLERANCE;

/// |sin(J5)| below this is treated as gimbal lock of J4 and J6.
pub const SINGULARITY_THRESHOLD: f64 = 1e-6;

/// Joints 4 to 6 of one wrist branch.
#[derive(Debug, Clone, Copy)]
pub struct WristSolution {
    pub theta4: f64,
    pub theta5: f64,
    pub theta6: f64,
}

/// Residual rotation of the wrist, R3_6 = transpose(R0_3) * R0_6. When the target is the
/// rotation of the tool frame, the tool link's own z rotation stays in the result.
pub fn residual_rotation(r0_3: &Rotation3<f64>, target: &Rotation3<f64>) -> Matrix3<f64> {
    (r0_3.inverse() * target).into_inner()
}

#[derive(Debug, Clone)]
pub struct OrientationSolver {
    /// Joint angle constants of links 4 to 6. The tool link has no twist, so its constant
    /// rotates about the J6 axis and is part of the J6 offset.
    theta_offsets: [f64; 3],
}

impl OrientationSolver {
    pub fn new(parameters: &Parameters) -> Self {
        OrientationSolver {
            theta_offsets: [
                parameters.links[3].theta,
                parameters.links[4].theta,
                parameters.links[5].theta + parameters.links[6].theta,
            ],
        }
    }

    /// Extract joints 4 to 6 from the residual rotation. Away from the singularity, both the
    /// normal (J5 >= 0) and the flipped (J5 < 0) wrist are returned, normal first.
    ///
    /// In the singularity, a single solution is returned: J6 takes `previous_theta6` (zero
    /// if not given) and J4 takes the rest of the determined sum (or difference).
    pub fn solve(&self, r3_6: &Matrix3<f64>, previous_theta6: Option<f64>) -> Result<Vec<WristSolution>, IkError> {
        let cos5 = r3_6[(1, 2)];
        if !cos5.is_finite() || cos5.abs() > 1.0 + ACOS_TOLERANCE {
            return Err(IkError::DegenerateRotation { value: cos5 });
        }
        let sin5 = r3_6[(0, 2)].hypot(r3_6[(2, 2)]);

        if sin5 < SINGULARITY_THRESHOLD {
            let theta6 = previous_theta6.unwrap_or(0.0) + self.theta_offsets[2];
            let solution = if cos5 > 0.0 {
                // Only J4 + J6 is known
                let sum = f64::atan2(-r3_6[(2, 0)], r3_6[(0, 0)]);
                self.joints(sum - theta6, 0.0, theta6)
            } else {
                // Only J4 - J6 is known
                let difference = f64::atan2(r3_6[(2, 0)], -r3_6[(0, 0)]);
                self.joints(difference + theta6, PI, theta6)
            };
            return Ok(vec![solution]);
        }

        let theta5 = cos5.clamp(-1.0, 1.0).acos();
        let normal = self.joints(
            f64::atan2(r3_6[(2, 2)], -r3_6[(0, 2)]),
            theta5,
            f64::atan2(-r3_6[(1, 1)], r3_6[(1, 0)]),
        );
        let flipped = self.joints(
            f64::atan2(-r3_6[(2, 2)], r3_6[(0, 2)]),
            -theta5,
            f64::atan2(r3_6[(1, 1)], -r3_6[(1, 0)]),
        );
        Ok(vec![normal, flipped])
    }

    /// Convert angles of the DH chain into joint angles.
    fn joints(&self, theta4: f64, theta5: f64, theta6: f64) -> WristSolution {
        WristSolution {
            theta4: theta4 - self.theta_offsets[0],
            theta5: theta5 - self.theta_offsets[1],
            theta6: theta6 - self.theta_offsets[2],
        }
    }
}
