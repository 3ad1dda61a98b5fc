//! Supports extracting DH parameters from YAML file (optional)

use std::path::Path;
use nalgebra::Rotation3;
use regex::Regex;
use yaml_rust2::{Yaml, YamlLoader};

use crate::parameter_error::ParameterError;
use crate::parameters::dh_kinematics::{DhLink, Parameters, LINKS};

const LINKS_KEY: &str = "dh_kinematics_links";
const CORRECTION_KEY: &str = "dh_kinematics_tool_correction";

impl Parameters {
    /// Read the robot configuration from YAML file. YAML file like this is supported:
    /// ```yaml
    /// # KUKA KR210
    /// dh_kinematics_links:
    ///   - { twist: 0, length: 0, offset: 0.75, theta: 0 }
    ///   - { twist: deg(-90), length: 0.35, offset: 0, theta: deg(-90) }
    ///   - { twist: 0, length: 1.25, offset: 0, theta: 0 }
    ///   - { twist: deg(-90), length: -0.054, offset: 1.5, theta: 0 }
    ///   - { twist: deg(90), length: 0, offset: 0, theta: 0 }
    ///   - { twist: deg(-90), length: 0, offset: 0, theta: 0 }
    ///   - { twist: 0, length: 0, offset: 0.303, theta: 0 }
    /// dh_kinematics_tool_correction: { roll: 0, pitch: deg(-90), yaw: deg(180) }
    /// ```
    /// The last link is the tool frame. The tool correction is optional (identity if missing),
    /// its angles compose as Rz(yaw) * Ry(pitch) * Rx(roll).
    ///
    /// Angles are in radians unless written as deg(angle). The parameters are validated
    /// before they are returned.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Same as from_yaml_file, but parses the YAML text directly.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let docs = YamlLoader::load_from_str(contents)
            .map_err(|e| ParameterError::ParseError(format!("{}", e)))?;
        let doc = docs.first()
            .ok_or_else(|| ParameterError::ParseError("empty YAML document".to_string()))?;
        let angles = AngleParser::new()?;

        let links_yaml = doc[LINKS_KEY].as_vec()
            .ok_or_else(|| ParameterError::MissingField(LINKS_KEY.to_string()))?;
        if links_yaml.len() != LINKS {
            return Err(ParameterError::InvalidLength { expected: LINKS, found: links_yaml.len() });
        }

        let mut links = [DhLink::new(0.0, 0.0, 0.0, 0.0); LINKS];
        for (i, link) in links_yaml.iter().enumerate() {
            links[i] = DhLink {
                twist: angles.field(link, "twist", i)?,
                length: number(link, "length", i)?,
                offset: number(link, "offset", i)?,
                theta: angles.field(link, "theta", i)?,
            };
        }

        let correction = &doc[CORRECTION_KEY];
        let tool_correction = if correction.is_badvalue() {
            Rotation3::identity()
        } else {
            Rotation3::from_euler_angles(
                angles.parse(&correction["roll"], "roll")?,
                angles.parse(&correction["pitch"], "pitch")?,
                angles.parse(&correction["yaw"], "yaw")?,
            )
        };

        let parameters = Parameters { links, tool_correction };
        parameters.validate()?;
        Ok(parameters)
    }
}

/// Parses plain numbers as radians and deg(x) as degrees.
struct AngleParser {
    deg: Regex,
}

impl AngleParser {
    fn new() -> Result<Self, ParameterError> {
        let deg = Regex::new(r"^\s*deg\(\s*([-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)\s*\)\s*$")
            .map_err(|e| ParameterError::ParseError(format!("{}", e)))?;
        Ok(AngleParser { deg })
    }

    fn field(&self, link: &Yaml, name: &str, index: usize) -> Result<f64, ParameterError> {
        self.parse(&link[name], &format!("link {} {}", index + 1, name))
    }

    fn parse(&self, value: &Yaml, what: &str) -> Result<f64, ParameterError> {
        match value {
            Yaml::String(text) => {
                let captures = self.deg.captures(text).ok_or_else(|| {
                    ParameterError::WrongAngle(format!("{}: '{}'", what, text))
                })?;
                let degrees: f64 = captures[1].parse()
                    .map_err(|_| ParameterError::WrongAngle(format!("{}: '{}'", what, text)))?;
                Ok(degrees.to_radians())
            }
            Yaml::BadValue => Err(ParameterError::MissingField(what.to_string())),
            other => as_f64(other)
                .ok_or_else(|| ParameterError::WrongAngle(format!("{}: {:?}", what, other))),
        }
    }
}

fn number(link: &Yaml, name: &str, index: usize) -> Result<f64, ParameterError> {
    let value = &link[name];
    if value.is_badvalue() {
        return Err(ParameterError::MissingField(format!("link {} {}", index + 1, name)));
    }
    as_f64(value).ok_or_else(|| {
        ParameterError::ParseError(format!("link {} {} is not a number: {:?}", index + 1, name, value))
    })
}

fn as_f64(value: &Yaml) -> Option<f64> {
    match value {
        Yaml::Real(_) => value.as_f64(),
        Yaml::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deg_notation() {
        let angles = AngleParser::new().expect("regex must compile");
        let value = Yaml::String("deg(-90)".to_string());
        let parsed = angles.parse(&value, "twist").expect("deg(-90) must parse");
        assert!((parsed + std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let value = Yaml::String("deg(12.5)".to_string());
        let parsed = angles.parse(&value, "theta").expect("deg(12.5) must parse");
        assert!((parsed - 12.5_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_bad_angle() {
        let angles = AngleParser::new().expect("regex must compile");
        let value = Yaml::String("rad(1)".to_string());
        assert!(matches!(angles.parse(&value, "twist"), Err(ParameterError::WrongAngle(_))));
    }

    #[test]
    fn test_wrong_number_of_links() {
        let yaml = "dh_kinematics_links:\n  - { twist: 0, length: 0, offset: 0.75, theta: 0 }\n";
        assert!(matches!(
            Parameters::from_yaml_str(yaml),
            Err(ParameterError::InvalidLength { expected: 7, found: 1 })
        ));
    }

    #[test]
    fn test_missing_links() {
        assert!(matches!(
            Parameters::from_yaml_str("something_else: 1\n"),
            Err(ParameterError::MissingField(_))
        ));
    }
}
