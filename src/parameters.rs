//! Defines the modified DH parameter data structure

pub mod dh_kinematics {
    use nalgebra::Rotation3;
    use crate::parameter_error::ParameterError;
    use crate::utils::deg;

    /// Number of links: six joints and the fixed tool frame.
    pub const LINKS: usize = 7;

    /// Geometric parameters of one joint-to-joint transform in the modified
    /// Denavit-Hartenberg convention.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct DhLink {
        /// Twist angle (alpha i-1), rotation about the previous x axis.
        pub twist: f64,

        /// Link length (a i-1), translation along the previous x axis.
        pub length: f64,

        /// Link offset (d i), translation along the joint z axis.
        pub offset: f64,

        /// Constant added to the joint angle. For the tool frame, this is the whole angle.
        pub theta: f64,
    }

    impl DhLink {
        pub const fn new(twist: f64, length: f64, offset: f64, theta: f64) -> Self {
            DhLink { twist, length, offset, theta }
        }
    }

    /// Parameters for the robot. See [parameters_robots.rs](parameters_robots.rs) for
    /// concrete robot models.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Parameters {
        /// Links of joints 1 to 6, followed by the fixed tool frame (link 7).
        pub links: [DhLink; LINKS],

        /// Fixed rotation from the tool frame of the DH chain to the frame in which the
        /// end-effector orientation is given by the caller. The end-effector orientation
        /// is the chain rotation multiplied by this correction.
        pub tool_correction: Rotation3<f64>,
    }

    impl Parameters {
        /// Height of joint 2 above the base (d1).
        pub fn d1(&self) -> f64 {
            self.links[0].offset
        }

        /// Forward offset of joint 2 from the base axis (a1).
        pub fn a1(&self) -> f64 {
            self.links[1].length
        }

        /// Length of the upper arm, joint 2 to joint 3 (a2).
        pub fn a2(&self) -> f64 {
            self.links[2].length
        }

        /// Drop of the forearm relative to joint 3 (a3).
        pub fn a3(&self) -> f64 {
            self.links[3].length
        }

        /// Length of the forearm, joint 3 to the wrist center (d4).
        pub fn d4(&self) -> f64 {
            self.links[3].offset
        }

        /// Distance from the wrist center to the end-effector along the tool z axis (d7).
        pub fn d7(&self) -> f64 {
            self.links[6].offset
        }

        /// Check that parameters are finite and describe an arm this closed form solves:
        /// parallel axes of joints 2 and 3, a spherical wrist with alternating twists.
        pub fn validate(&self) -> Result<(), ParameterError> {
            for (i, link) in self.links.iter().enumerate() {
                for (name, val) in [
                    ("twist", link.twist), ("length", link.length),
                    ("offset", link.offset), ("theta", link.theta),
                ] {
                    if !val.is_finite() {
                        return Err(ParameterError::ParseError(format!(
                            "link {} parameter '{}' must be finite (got {})", i + 1, name, val
                        )));
                    }
                }
            }

            const TOLERANCE: f64 = 1e-9;
            let half_pi = std::f64::consts::FRAC_PI_2;
            let expected_twists = [0.0, -half_pi, 0.0, -half_pi, half_pi, -half_pi, 0.0];
            for (i, (link, expected)) in self.links.iter().zip(expected_twists).enumerate() {
                if (link.twist - expected).abs() > TOLERANCE {
                    return Err(ParameterError::KinematicsConfigurationError(format!(
                        "link {} twist must be {} (got {})", i + 1, deg(&expected), deg(&link.twist)
                    )));
                }
            }

            let zero_lengths = [(0, "a0"), (4, "a4"), (5, "a5"), (6, "a6")];
            for (i, name) in zero_lengths {
                if self.links[i].length.abs() > TOLERANCE {
                    return Err(ParameterError::KinematicsConfigurationError(format!(
                        "{} must be 0 for a spherical wrist (got {})", name, self.links[i].length
                    )));
                }
            }
            let zero_offsets = [(1, "d2"), (2, "d3"), (4, "d5"), (5, "d6")];
            for (i, name) in zero_offsets {
                if self.links[i].offset.abs() > TOLERANCE {
                    return Err(ParameterError::KinematicsConfigurationError(format!(
                        "{} must be 0 for a spherical wrist (got {})", name, self.links[i].offset
                    )));
                }
            }
            if self.a2() <= 0.0 || self.d4().hypot(self.a3()) <= 0.0 {
                return Err(ParameterError::KinematicsConfigurationError(
                    "upper arm and forearm must have non-zero length".to_string(),
                ));
            }
            Ok(())
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            let links = self.links.iter()
                .map(|link| format!(
                    "  - {{ twist: {}, length: {}, offset: {}, theta: {} }}\n",
                    deg(&link.twist), link.length, link.offset, deg(&link.theta)
                ))
                .collect::<String>();
            let (roll, pitch, yaw) = self.tool_correction.euler_angles();
            format!(
                "dh_kinematics_links:\n{}\
                dh_kinematics_tool_correction: {{ roll: {}, pitch: {}, yaw: {} }}\n",
                links,
                deg(&roll),
                deg(&pitch),
                deg(&yaw)
            )
        }
    }
}
