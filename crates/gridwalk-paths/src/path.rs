//! Checks and measurements over returned paths.

use std::collections::HashSet;

use gridwalk_core::Point;

use crate::diagonal::DiagonalMovement;
use crate::traits::Walkable;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance: the number of king moves between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Whether `to` is among the neighbors `grid` enumerates for `from`
/// under `policy`.
pub fn is_legal_step<G: Walkable + ?Sized>(
    grid: &G,
    policy: DiagonalMovement,
    from: Point,
    to: Point,
) -> bool {
    if chebyshev(from, to) != 1 {
        return false;
    }
    let mut buf = Vec::with_capacity(8);
    grid.neighbors(from, policy, &mut buf);
    buf.contains(&to)
}

/// Whether every consecutive pair of `path` is a legal step and no
/// position repeats. The empty path is valid.
pub fn is_valid_path<G: Walkable + ?Sized>(
    grid: &G,
    policy: DiagonalMovement,
    path: &[Point],
) -> bool {
    let mut seen = HashSet::with_capacity(path.len());
    path.iter().all(|&p| seen.insert(p))
        && path
            .windows(2)
            .all(|w| is_legal_step(grid, policy, w[0], w[1]))
}

/// Geometric length of `path`: orthogonal steps count 1, diagonal steps
/// count √2.
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2)
        .map(|w| {
            let d = w[1] - w[0];
            f64::from(d.x * d.x + d.y * d.y).sqrt()
        })
        .sum()
}
