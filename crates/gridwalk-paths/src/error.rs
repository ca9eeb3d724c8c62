use gridwalk_core::Point;
use thiserror::Error;

/// Failures surfaced by the grid collaborator during a search.
///
/// An unreachable goal is not an error: it yields an empty path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FindError {
    /// A requested endpoint does not map to a grid node.
    #[error("coordinates {0} are outside the grid")]
    OutOfBounds(Point),
    /// Neighbor enumeration produced a position outside the grid.
    #[error("grid reported neighbor {to} of {from} outside its range")]
    MalformedGrid { from: Point, to: Point },
    /// `node_at` mapped an endpoint to an index other than its row-major
    /// slot in the grid's range.
    #[error("grid mapped {point} to node {index}, not its row-major index")]
    MisindexedNode { point: Point, index: usize },
}

/// Returned when a string names no [`DiagonalMovement`](crate::DiagonalMovement).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown diagonal movement policy {0:?}")]
pub struct ParsePolicyError(pub String);
