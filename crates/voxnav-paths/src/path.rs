//! Path reconstruction from predecessor maps.

use std::fmt;

use voxnav_core::Point3;

use crate::traversal::PredecessorMap;

/// A predecessor map that cannot describe a route back to the origin.
///
/// These indicate a map that was built incorrectly, not an unreachable goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// `node` has no predecessor but is not the origin.
    BrokenChain { node: Point3 },
    /// The predecessor of `node` was never recorded in the map.
    MissingLink { node: Point3 },
    /// Walking back from the goal revisited `node` without meeting the origin.
    Cycle { node: Point3 },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrokenChain { node } => {
                write!(f, "path: node {node} has no predecessor but is not the origin")
            }
            Self::MissingLink { node } => {
                write!(f, "path: predecessor {node} is missing from the map")
            }
            Self::Cycle { node } => write!(f, "path: predecessor chain loops at {node}"),
        }
    }
}

impl std::error::Error for PathError {}

/// Walk `came_from` backward from `goal` to `origin`.
///
/// Returns the visited positions in goal → origin order, goal included and
/// origin excluded. `Ok(None)` means `goal` was never reached. When
/// `goal == origin` the route is empty.
pub fn reconstruct_path(
    came_from: &PredecessorMap,
    origin: Point3,
    goal: Point3,
) -> Result<Option<Vec<Point3>>, PathError> {
    if !came_from.contains(goal) {
        return Ok(None);
    }

    let mut path = Vec::new();
    let mut current = goal;
    while current != origin {
        if path.len() >= came_from.len() {
            return Err(PathError::Cycle { node: current });
        }
        path.push(current);
        current = match came_from.get(current) {
            Some(Some(prev)) => prev,
            Some(None) => return Err(PathError::BrokenChain { node: current }),
            None => return Err(PathError::MissingLink { node: current }),
        };
    }
    Ok(Some(path))
}

/// Offsets between consecutive positions of a route.
pub fn steps(route: &[Point3]) -> Vec<Point3> {
    route.windows(2).map(|w| w[1] - w[0]).collect()
}
