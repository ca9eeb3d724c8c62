use gridwalk_core::{Point, Range, WalkGrid};

use crate::diagonal::DiagonalMovement;
use crate::error::FindError;
use crate::neighbors;

/// Grid interface consumed by the finders.
///
/// Nodes are addressed by their flat row-major index inside
/// [`range`](Walkable::range).
pub trait Walkable {
    /// Rectangle of addressable nodes.
    fn range(&self) -> Range;

    /// Whether `p` can be stepped on. Must be `false` outside the range.
    fn is_walkable(&self, p: Point) -> bool;

    /// Resolve `p` to its node index. An override must still return the
    /// index [`Range::index_of`] gives inside [`range`](Walkable::range).
    fn node_at(&self, p: Point) -> Result<usize, FindError> {
        self.range().index_of(p).ok_or(FindError::OutOfBounds(p))
    }

    /// Append the neighbors of `p` admitted by `policy` into `buf`, in a
    /// stable order. The caller clears `buf` before calling.
    ///
    /// The provided implementation uses
    /// [`policy_neighbors`](crate::policy_neighbors).
    fn neighbors(&self, p: Point, policy: DiagonalMovement, buf: &mut Vec<Point>) {
        neighbors::policy_neighbors(p, policy, |q| self.is_walkable(q), buf);
    }
}

impl Walkable for WalkGrid {
    #[inline]
    fn range(&self) -> Range {
        self.bounds()
    }

    #[inline]
    fn is_walkable(&self, p: Point) -> bool {
        WalkGrid::is_walkable(self, p)
    }
}
