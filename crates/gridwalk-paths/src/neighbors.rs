use gridwalk_core::Point;

use crate::diagonal::DiagonalMovement;

/// Orthogonal directions in enumeration order: up, right, down, left.
pub const ORTHOGONAL: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

/// Diagonal directions in enumeration order: up-left, up-right,
/// down-right, down-left. Diagonal `i` is flanked by orthogonals
/// `(i + 3) % 4` and `i`.
pub const DIAGONAL: [Point; 4] = [
    Point::new(-1, -1),
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
];

/// Append the neighbors of `p` reachable under `policy` into `buf`.
///
/// Walkable orthogonal neighbors come first (up, right, down, left),
/// followed by the admitted walkable diagonals (up-left, up-right,
/// down-right, down-left). The caller clears `buf` before calling.
pub fn policy_neighbors(
    p: Point,
    policy: DiagonalMovement,
    walkable: impl Fn(Point) -> bool,
    buf: &mut Vec<Point>,
) {
    let mut open = [false; 4];
    for (i, d) in ORTHOGONAL.into_iter().enumerate() {
        let n = p + d;
        if walkable(n) {
            open[i] = true;
            buf.push(n);
        }
    }
    if !policy.allows_diagonals() {
        return;
    }
    for (i, d) in DIAGONAL.into_iter().enumerate() {
        if !policy.admits(open[(i + 3) % 4], open[i]) {
            continue;
        }
        let n = p + d;
        if walkable(n) {
            buf.push(n);
        }
    }
}
