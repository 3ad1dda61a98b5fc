//! Error handling for parameter validation and extraction

use std::io;

/// Unified error to report failures during both YAML parsing and validation of parameters.
#[derive(thiserror::Error, Debug)]
pub enum ParameterError {
    #[error("IO Error: {0}")]
    IoError(#[from] io::Error),

    #[error("Parse Error: {0}")]
    ParseError(String),

    #[error("Missing Field: {0}")]
    MissingField(String),

    #[error("Wrong angle representation: {0}")]
    WrongAngle(String),

    #[error("Invalid Length: expected {expected}, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("Kinematics Configuration Error: {0}")]
    KinematicsConfigurationError(String),
}
