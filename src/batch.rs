//! Solves sequences of end-effector poses, one joint set per pose, in the order of the poses.
//!
//! An empty sequence fails the whole batch. A pose that cannot be solved fails only its own
//! waypoint, the error carries the index of the waypoint.

use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::ik_error::{BatchError, IkError, WaypointError};
use crate::kinematic_traits::{Joints, Kinematics, Pose};
use crate::request::PoseRecord;

/// Joints for the waypoint, or the reason it was rejected.
pub type WaypointResult = Result<Joints, WaypointError>;

/// Solve every pose independently, taking the preferred candidate for each.
pub fn solve_batch<K: Kinematics + ?Sized>(robot: &K, poses: &[Pose]) -> Result<Vec<WaypointResult>, BatchError> {
    check_not_empty(poses.len())?;
    let results: Vec<WaypointResult> = poses.iter()
        .enumerate()
        .map(|(index, pose)| solve_waypoint(robot, index, Ok(*pose), None))
        .collect();
    report(&results);
    Ok(results)
}

/// Solve the poses as a trajectory: each waypoint takes the candidate closest to the last
/// solved waypoint (or to `start` for the first ones). Rejected waypoints do not break the
/// chain, the next waypoint continues from the last success.
pub fn solve_trajectory<K: Kinematics + ?Sized>(
    robot: &K,
    poses: &[Pose],
    start: Option<&Joints>,
) -> Result<Vec<WaypointResult>, BatchError> {
    check_not_empty(poses.len())?;
    let mut previous = start.copied();
    let mut results = Vec::with_capacity(poses.len());
    for (index, pose) in poses.iter().enumerate() {
        let result = solve_waypoint(robot, index, Ok(*pose), previous.as_ref());
        if let Ok(joints) = &result {
            previous = Some(*joints);
        }
        results.push(result);
    }
    report(&results);
    Ok(results)
}

/// Same as solve_batch, with the waypoints solved in parallel. The order of the results
/// is the order of the poses.
#[cfg(feature = "parallel")]
pub fn solve_batch_parallel<K: Kinematics + ?Sized>(robot: &K, poses: &[Pose]) -> Result<Vec<WaypointResult>, BatchError> {
    check_not_empty(poses.len())?;
    let results: Vec<WaypointResult> = poses.par_iter()
        .enumerate()
        .map(|(index, pose)| solve_waypoint(robot, index, Ok(*pose), None))
        .collect();
    report(&results);
    Ok(results)
}

/// Solve the poses as received in a request. Every record is validated first, a malformed
/// record fails its own waypoint.
pub fn solve_records<K: Kinematics + ?Sized>(robot: &K, records: &[PoseRecord]) -> Result<Vec<WaypointResult>, BatchError> {
    check_not_empty(records.len())?;
    let results: Vec<WaypointResult> = records.iter()
        .enumerate()
        .map(|(index, record)| solve_waypoint(robot, index, record.to_pose(), None))
        .collect();
    report(&results);
    Ok(results)
}

fn check_not_empty(count: usize) -> Result<(), BatchError> {
    info!("Received {} end-effector poses", count);
    if count == 0 {
        warn!("No valid poses received");
        return Err(BatchError::EmptyRequest);
    }
    Ok(())
}

fn solve_waypoint<K: Kinematics + ?Sized>(
    robot: &K,
    index: usize,
    pose: Result<Pose, IkError>,
    previous: Option<&Joints>,
) -> WaypointResult {
    let solutions = pose.and_then(|pose| match previous {
        Some(previous) => robot.inverse_continuing(&pose, previous),
        None => robot.inverse(&pose),
    });
    match solutions.map(|solutions| solutions.first().copied()) {
        Ok(Some(joints)) => {
            if let Some(singularity) = robot.kinematic_singularity(&joints) {
                debug!(index, ?singularity, "Wrist singularity, J6 fixed by convention");
            }
            debug!(index, ?joints, "Waypoint solved");
            Ok(joints)
        }
        Ok(None) => {
            let source = IkError::MalformedInput("solver returned no candidates".to_string());
            warn!(index, error = %source, "Waypoint rejected");
            Err(WaypointError { index, source })
        }
        Err(source) => {
            warn!(index, error = %source, "Waypoint rejected");
            Err(WaypointError { index, source })
        }
    }
}

fn report(results: &[WaypointResult]) {
    let failed = results.iter().filter(|r| r.is_err()).count();
    info!("Joint trajectory of {} points, {} rejected", results.len(), failed);
}
