use crate::kinematic_traits::{Joints, Kinematics};
use crate::kinematics_impl::DhKinematics;
use crate::parameter_error::ParameterError;
use crate::parameters::dh_kinematics::Parameters;
use crate::utils::assert_pose_eq;

use super::test_utils::{load_parameters, CALIBRATION_JOINTS};

const READ_ERROR: &str = "Failed to load parameters from file";

#[test]
fn test_parameters_from_yaml() {
    let loaded = load_parameters("src/tests/data/kuka_kr210.yaml").expect(READ_ERROR);
    let expected = Parameters::kuka_kr210();

    for (i, (a, b)) in expected.links.iter().zip(loaded.links.iter()).enumerate() {
        assert!((a.twist - b.twist).abs() < 1e-12, "link {} twist", i + 1);
        assert!((a.theta - b.theta).abs() < 1e-12, "link {} theta", i + 1);
        assert_eq!(a.length, b.length, "link {} length", i + 1);
        assert_eq!(a.offset, b.offset, "link {} offset", i + 1);
    }
    let difference = (expected.tool_correction.matrix() - loaded.tool_correction.matrix()).abs().max();
    assert!(difference < 1e-12, "tool correction differs by {}", difference);
}

#[test]
fn test_loaded_robot_solves() {
    let robot = DhKinematics::new(load_parameters("src/tests/data/kuka_kr210.yaml").expect(READ_ERROR));
    let reference = DhKinematics::new(Parameters::kuka_kr210());
    let pose = reference.forward(&CALIBRATION_JOINTS);
    assert_pose_eq(&pose, &robot.forward(&CALIBRATION_JOINTS), 1e-9, 1e-9);
    let solutions = robot.inverse(&pose).expect("calibration pose is reachable");
    assert_eq!(solutions.len(), 4);
}

#[test]
fn test_turned_tool_round_trip() {
    let parameters = load_parameters("src/tests/data/kuka_kr210_tool_turned.yaml").expect(READ_ERROR);
    assert!((parameters.links[6].theta - 30.0_f64.to_radians()).abs() < 1e-12);
    let robot = DhKinematics::new(parameters);

    let joints: Joints = [0.4, 0.2, -0.3, 0.8, 0.6, -1.2];
    let pose = robot.forward(&joints);
    let solutions = robot.inverse(&pose).expect("pose is reachable");
    for solution in &solutions {
        assert_pose_eq(&pose, &robot.forward(solution), 1e-9, 1e-9);
    }
    assert!((solutions[0][5] - joints[5]).abs() < 1e-9, "J6 = {}", solutions[0][5]);
}

#[test]
fn test_to_yaml_reads_back() {
    let parameters = Parameters::kuka_kr210();
    let loaded = Parameters::from_yaml_str(&parameters.to_yaml()).expect("own YAML must parse");
    for (a, b) in parameters.links.iter().zip(loaded.links.iter()) {
        assert!((a.twist - b.twist).abs() < 1e-6);
        assert!((a.theta - b.theta).abs() < 1e-6);
        assert!((a.length - b.length).abs() < 1e-12);
        assert!((a.offset - b.offset).abs() < 1e-12);
    }
    let difference = (parameters.tool_correction.matrix() - loaded.tool_correction.matrix()).abs().max();
    assert!(difference < 1e-5, "tool correction differs by {}", difference);
}

#[test]
fn test_offset_wrist_rejected() {
    let result = Parameters::from_yaml_file("src/tests/data/offset_wrist.yaml");
    assert!(matches!(result, Err(ParameterError::KinematicsConfigurationError(_))));
}

#[test]
fn test_missing_file() {
    let result = Parameters::from_yaml_file("src/tests/data/no_such_robot.yaml");
    assert!(matches!(result, Err(ParameterError::IoError(_))));
}
