//! Errors reported by the inverse kinematics solver and the batch orchestrator

/// Failure to solve a single pose.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum IkError {
    /// The wrist center is outside the reach of the arm: the triangle joint 2, joint 3,
    /// wrist center cannot be built.
    #[error("Unreachable pose: cosine of {quantity} is {value:.6}, joint 2 to wrist center distance {distance:.4}")]
    UnreachablePose {
        /// Name of the triangle angle whose cosine left [-1, 1]
        quantity: &'static str,
        /// The offending cosine argument
        value: f64,
        /// Distance from the joint 2 axis to the wrist center
        distance: f64,
    },

    /// The residual wrist rotation is not a rotation, J5 cosine out of range.
    #[error("Degenerate wrist rotation: cosine of J5 is {value:.6}")]
    DegenerateRotation { value: f64 },

    /// The pose itself is not usable (non-finite values, non-unit quaternion).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The pose was well formed, but every candidate came out non-finite.
    #[error("No finite solution among {candidates} candidates")]
    NoFiniteSolution { candidates: usize },
}

/// Failure to solve the waypoint at the given index of a batch.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Waypoint {index}: {source}")]
pub struct WaypointError {
    pub index: usize,
    #[source]
    pub source: IkError,
}

/// Failure of the batch as a whole.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("No valid poses received")]
    EmptyRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_error_names_index() {
        let error = WaypointError {
            index: 3,
            source: IkError::UnreachablePose { quantity: "tri_alpha", value: 1.25, distance: 4.0 },
        };
        let message = error.to_string();
        assert!(message.starts_with("Waypoint 3:"), "{}", message);
        assert!(message.contains("tri_alpha"), "{}", message);
        assert!(message.contains("1.250000"), "{}", message);
    }

    #[test]
    fn test_empty_request_message() {
        assert_eq!(BatchError::EmptyRequest.to_string(), "No valid poses received");
    }
}
