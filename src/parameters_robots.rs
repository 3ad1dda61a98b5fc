//! Hardcoded DH parameters for robots

pub mod dh_kinematics {
    use crate::parameters::dh_kinematics::{DhLink, Parameters, LINKS};
    use nalgebra::Rotation3;
    use std::f64::consts::PI;

    #[allow(dead_code)]
    impl Parameters {
        // Provides default values
        pub fn new() -> Self {
            Parameters {
                links: [DhLink::new(0.0, 0.0, 0.0, 0.0); LINKS],
                tool_correction: Rotation3::identity(),
            }
        }

        /// KUKA KR210. The gripper frame of the simulation model has its z axis along
        /// the approach direction, DH tool frame z axis points the same way after
        /// rotating by 180° around z and then by -90° around y.
        pub fn kuka_kr210() -> Self {
            Parameters {
                links: [
                    DhLink::new(0.0, 0.0, 0.75, 0.0),
                    DhLink::new(-PI / 2.0, 0.35, 0.0, -PI / 2.0),
                    DhLink::new(0.0, 1.25, 0.0, 0.0),
                    DhLink::new(-PI / 2.0, -0.054, 1.5, 0.0),
                    DhLink::new(PI / 2.0, 0.0, 0.0, 0.0),
                    DhLink::new(-PI / 2.0, 0.0, 0.0, 0.0),
                    DhLink::new(0.0, 0.0, 0.303, 0.0),
                ],
                tool_correction: kr210_tool_correction(),
            }
        }
    }

    impl Default for Parameters {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Rz(180°) * Ry(-90°)
    fn kr210_tool_correction() -> Rotation3<f64> {
        Rotation3::from_axis_angle(&nalgebra::Vector3::z_axis(), PI)
            * Rotation3::from_axis_angle(&nalgebra::Vector3::y_axis(), -PI / 2.0)
    }

}
