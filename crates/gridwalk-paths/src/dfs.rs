//! Depth-first search pathfinding.
//!
//! The search expands the first unvisited neighbor of the current node,
//! backtracks when a node's neighbors are exhausted, and stops at the first
//! node equal to the goal. The returned path is *a* path, not a shortest
//! one; which path is returned depends only on the grid's neighbor order
//! (see [`Walkable::neighbors`]).
//!
//! Expansion runs on an explicit frame stack, so search depth is bounded
//! by heap memory rather than by the thread's call stack.

use gridwalk_core::{Point, Range};

use crate::diagonal::{DiagonalMovement, FinderOptions};
use crate::error::FindError;
use crate::nodes::NodeTable;
use crate::traits::Walkable;

/// Counters describing the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose neighbors were enumerated.
    pub expanded: usize,
    /// Deepest frame stack reached.
    pub max_depth: usize,
}

/// One suspended expansion: `node`'s neighbors live in
/// `arena[start..end]` and `next` is the cursor into them.
#[derive(Clone, Copy, Debug)]
struct Frame {
    node: usize,
    start: usize,
    next: usize,
    end: usize,
}

/// Depth-first path finder.
///
/// The finder keeps its node table and stacks between calls so repeated
/// searches stop allocating once warmed up. Visitation state never leaks
/// from one search into the next.
#[derive(Debug)]
pub struct DepthFirstFinder {
    policy: DiagonalMovement,
    nodes: NodeTable,
    stack: Vec<Frame>,
    // Neighbor indices of every frame on `stack`, in stack order.
    arena: Vec<usize>,
    nbuf: Vec<Point>,
    stats: SearchStats,
}

impl Default for DepthFirstFinder {
    fn default() -> Self {
        Self::new(FinderOptions::default())
    }
}

impl From<DiagonalMovement> for DepthFirstFinder {
    fn from(policy: DiagonalMovement) -> Self {
        Self::new(FinderOptions::with_policy(policy))
    }
}

impl DepthFirstFinder {
    /// Create a finder, resolving the diagonal policy from `options`.
    pub fn new(options: FinderOptions) -> Self {
        Self {
            policy: options.resolve(),
            nodes: NodeTable::default(),
            stack: Vec::new(),
            arena: Vec::new(),
            nbuf: Vec::with_capacity(8),
            stats: SearchStats::default(),
        }
    }

    /// The resolved diagonal movement policy.
    #[inline]
    pub fn policy(&self) -> DiagonalMovement {
        self.policy
    }

    /// Counters from the most recent search.
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Find a path from `(start_x, start_y)` to `(end_x, end_y)`.
    ///
    /// Shorthand for [`find`](Self::find).
    pub fn find_path<G: Walkable + ?Sized>(
        &mut self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        grid: &G,
    ) -> Result<Vec<Point>, FindError> {
        self.find(Point::new(start_x, start_y), Point::new(end_x, end_y), grid)
    }

    /// Find a path from `from` to `to`.
    ///
    /// Returns the path including both endpoints, or an empty vector when
    /// `to` is unreachable. Fails only when the grid cannot resolve an
    /// endpoint or reports a neighbor outside its range.
    pub fn find<G: Walkable + ?Sized>(
        &mut self,
        from: Point,
        to: Point,
        grid: &G,
    ) -> Result<Vec<Point>, FindError> {
        let rng = grid.range();
        let start = endpoint(grid, rng, from)?;
        let goal = endpoint(grid, rng, to)?;

        self.nodes.begin(rng.len());
        self.stack.clear();
        self.arena.clear();
        self.stats = SearchStats::default();

        let path = if self.enter(start, goal, grid, rng)? {
            self.nodes.backtrace(goal, rng)
        } else {
            self.run(goal, grid, rng)?
        };

        log::debug!(
            "dfs {from} -> {to} ({}): {} cells, {} expanded, depth {}",
            self.policy,
            path.len(),
            self.stats.expanded,
            self.stats.max_depth,
        );
        Ok(path)
    }

    /// Drive the frame stack until the goal is entered or every reachable
    /// node is exhausted.
    fn run<G: Walkable + ?Sized>(
        &mut self,
        goal: usize,
        grid: &G,
        rng: Range,
    ) -> Result<Vec<Point>, FindError> {
        while let Some(frame) = self.stack.last_mut() {
            if frame.next == frame.end {
                let done = *frame;
                self.stack.pop();
                self.arena.truncate(done.start);
                // Everything reachable only through `done.node` is exhausted.
                self.nodes.get_mut(done.node).closed = true;
                continue;
            }

            let ni = self.arena[frame.next];
            frame.next += 1;
            let parent = frame.node;

            let n = self.nodes.get_mut(ni);
            if n.opened || n.closed {
                continue;
            }
            n.opened = true;
            n.parent = parent;

            if self.enter(ni, goal, grid, rng)? {
                return Ok(self.nodes.backtrace(goal, rng));
            }
        }
        Ok(Vec::new())
    }

    /// Visit `node`: report `true` if it is the goal, otherwise close it
    /// and push a frame over its neighbors.
    fn enter<G: Walkable + ?Sized>(
        &mut self,
        node: usize,
        goal: usize,
        grid: &G,
        rng: Range,
    ) -> Result<bool, FindError> {
        self.nodes.get_mut(node).opened = true;
        if node == goal {
            return Ok(true);
        }
        self.nodes.get_mut(node).closed = true;
        self.stats.expanded += 1;

        let p = rng.point_at(node);
        log::trace!("dfs expand {p} at depth {}", self.stack.len());

        self.nbuf.clear();
        grid.neighbors(p, self.policy, &mut self.nbuf);

        let start = self.arena.len();
        for &np in &self.nbuf {
            let ni = rng
                .index_of(np)
                .ok_or(FindError::MalformedGrid { from: p, to: np })?;
            self.arena.push(ni);
        }
        self.stack.push(Frame {
            node,
            start,
            next: start,
            end: self.arena.len(),
        });
        self.stats.max_depth = self.stats.max_depth.max(self.stack.len());
        Ok(false)
    }
}

/// Resolve `p` through the grid, rejecting any index that disagrees with
/// the row-major layout of `rng`.
fn endpoint<G: Walkable + ?Sized>(grid: &G, rng: Range, p: Point) -> Result<usize, FindError> {
    let index = grid.node_at(p)?;
    if rng.index_of(p) != Some(index) {
        return Err(FindError::MisindexedNode { point: p, index });
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::path::{is_valid_path, manhattan};
    use gridwalk_core::WalkGrid;

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().copied().map(Point::from).collect()
    }

    fn bfs_reachable(grid: &WalkGrid, policy: DiagonalMovement, from: Point, to: Point) -> bool {
        let rng = grid.bounds();
        let mut seen = vec![false; rng.len()];
        let mut queue = VecDeque::from([from]);
        seen[rng.index_of(from).unwrap()] = true;
        let mut buf = Vec::new();
        while let Some(p) = queue.pop_front() {
            if p == to {
                return true;
            }
            buf.clear();
            grid.neighbors(p, policy, &mut buf);
            for &n in &buf {
                let i = rng.index_of(n).unwrap();
                if !seen[i] {
                    seen[i] = true;
                    queue.push_back(n);
                }
            }
        }
        false
    }

    /// Corridor that snakes through every row, with one gap per wall row.
    fn serpentine(w: i32, h: i32) -> WalkGrid {
        let mut g = WalkGrid::new(w, h);
        for y in (1..h).step_by(2) {
            let gap = if y % 4 == 1 { w - 1 } else { 0 };
            for x in (0..w).filter(|&x| x != gap) {
                g.set_walkable(Point::new(x, y), false);
            }
        }
        g
    }

    #[test]
    fn open_grid_orthogonal_path() {
        let g = WalkGrid::new(3, 3);
        let mut f = DepthFirstFinder::from(DiagonalMovement::Never);
        let path = f.find_path(0, 0, 2, 2, &g).unwrap();
        assert_eq!(path, pts(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]));
        assert!(path.windows(2).all(|w| manhattan(w[0], w[1]) == 1));
        assert_eq!(
            f.last_stats(),
            SearchStats {
                expanded: 4,
                max_depth: 4
            }
        );
    }

    #[test]
    fn blocked_center_is_avoided() {
        let g = WalkGrid::from_ascii(
            "
            ...
            .#.
            ...
            ",
        )
        .unwrap();
        let mut f = DepthFirstFinder::from(DiagonalMovement::Never);
        let path = f.find_path(0, 0, 2, 2, &g).unwrap();
        assert!(path.len() >= 5);
        assert!(!path.contains(&Point::new(1, 1)));
        assert!(is_valid_path(&g, DiagonalMovement::Never, &path));
    }

    #[test]
    fn start_equals_goal() {
        let g = WalkGrid::new(4, 4);
        let mut f = DepthFirstFinder::default();
        assert_eq!(f.find_path(2, 3, 2, 3, &g).unwrap(), pts(&[(2, 3)]));
        assert_eq!(f.last_stats().expanded, 0);
    }

    #[test]
    fn enclosed_goal_is_exhaustion_not_error() {
        let g = WalkGrid::from_ascii(
            "
            .....
            .###.
            .#.#.
            .###.
            .....
            ",
        )
        .unwrap();
        for policy in DiagonalMovement::ALL {
            let mut f = DepthFirstFinder::from(policy);
            assert_eq!(f.find_path(0, 0, 2, 2, &g), Ok(Vec::new()));
            // The whole outer ring was explored before giving up.
            assert_eq!(f.last_stats().expanded, 16);
        }
    }

    #[test]
    fn diagonal_squeeze_only_under_always() {
        let g = WalkGrid::from_ascii(
            "
            .#
            #.
            ",
        )
        .unwrap();
        for policy in DiagonalMovement::ALL {
            let path = DepthFirstFinder::from(policy).find_path(0, 0, 1, 1, &g).unwrap();
            if policy == DiagonalMovement::Always {
                assert_eq!(path, pts(&[(0, 0), (1, 1)]));
            } else {
                assert!(path.is_empty(), "{policy} squeezed through");
            }
        }
    }

    #[test]
    fn corner_cut_follows_policy() {
        // From (1,0) the step down-left to (0,1) cuts the blocked corner
        // at (0,0). Only the permissive policies take it.
        let g = WalkGrid::from_ascii(
            "
            #..
            ...
            ",
        )
        .unwrap();
        let run = |policy: DiagonalMovement| {
            DepthFirstFinder::from(policy)
                .find_path(2, 0, 0, 1, &g)
                .unwrap()
        };
        let cut = pts(&[(2, 0), (2, 1), (1, 1), (1, 0), (0, 1)]);
        let around = pts(&[(2, 0), (2, 1), (1, 1), (0, 1)]);
        assert_eq!(run(DiagonalMovement::Never), around);
        assert_eq!(run(DiagonalMovement::OnlyWhenNoObstacles), around);
        assert_eq!(run(DiagonalMovement::IfAtMostOneObstacle), cut);
        assert_eq!(run(DiagonalMovement::Always), cut);
    }

    #[test]
    fn legacy_options_drive_policy() {
        let f = DepthFirstFinder::new(FinderOptions::legacy(true, true));
        assert_eq!(f.policy(), DiagonalMovement::OnlyWhenNoObstacles);
        let f = DepthFirstFinder::new(FinderOptions {
            diagonal_movement: Some(DiagonalMovement::Never),
            allow_diagonal: true,
            dont_cross_corners: false,
        });
        assert_eq!(f.policy(), DiagonalMovement::Never);
    }

    #[test]
    fn out_of_bounds_endpoints() {
        let g = WalkGrid::new(3, 3);
        let mut f = DepthFirstFinder::default();
        assert_eq!(
            f.find_path(5, 5, 0, 0, &g),
            Err(FindError::OutOfBounds(Point::new(5, 5)))
        );
        assert_eq!(
            f.find_path(0, 0, 0, -1, &g),
            Err(FindError::OutOfBounds(Point::new(0, -1)))
        );
    }

    struct Leaky;

    impl Walkable for Leaky {
        fn range(&self) -> Range {
            Range::new(0, 0, 2, 1)
        }

        fn is_walkable(&self, p: Point) -> bool {
            self.range().contains(p)
        }

        fn neighbors(&self, p: Point, _policy: DiagonalMovement, buf: &mut Vec<Point>) {
            buf.push(p.shift(5, 0));
        }
    }

    #[test]
    fn malformed_neighbors_propagate() {
        let mut f = DepthFirstFinder::default();
        assert_eq!(
            f.find_path(0, 0, 1, 0, &Leaky),
            Err(FindError::MalformedGrid {
                from: Point::new(0, 0),
                to: Point::new(5, 0)
            })
        );
        // A failed search leaves the finder usable.
        let g = WalkGrid::new(2, 1);
        assert_eq!(f.find_path(0, 0, 1, 0, &g).unwrap().len(), 2);
    }

    /// Grid whose `node_at` ignores the row-major layout.
    struct Misindexed {
        offset: usize,
        column_major: bool,
    }

    impl Walkable for Misindexed {
        fn range(&self) -> Range {
            Range::new(0, 0, 3, 2)
        }

        fn is_walkable(&self, p: Point) -> bool {
            self.range().contains(p)
        }

        fn node_at(&self, p: Point) -> Result<usize, FindError> {
            if !self.range().contains(p) {
                return Err(FindError::OutOfBounds(p));
            }
            let idx = if self.column_major {
                (p.x * 2 + p.y) as usize
            } else {
                (p.y * 3 + p.x) as usize
            };
            Ok(idx + self.offset)
        }
    }

    #[test]
    fn misindexed_endpoints_are_rejected() {
        let mut f = DepthFirstFinder::default();
        let shifted = Misindexed {
            offset: 100,
            column_major: false,
        };
        assert_eq!(
            f.find_path(0, 0, 1, 0, &shifted),
            Err(FindError::MisindexedNode {
                point: Point::new(0, 0),
                index: 100
            })
        );

        // (0,0) agrees in both layouts; (1,0) is index 2 column-major.
        let transposed = Misindexed {
            offset: 0,
            column_major: true,
        };
        assert_eq!(
            f.find_path(0, 0, 1, 0, &transposed),
            Err(FindError::MisindexedNode {
                point: Point::new(1, 0),
                index: 2
            })
        );

        let layout_ok = Misindexed {
            offset: 0,
            column_major: false,
        };
        assert_eq!(
            f.find_path(0, 0, 1, 0, &layout_ok).unwrap(),
            pts(&[(0, 0), (1, 0)])
        );
    }

    #[test]
    fn closed_nodes_were_opened() {
        let g = WalkGrid::from_ascii(
            "
            ..#..
            .##..
            ...#.
            #....
            ",
        )
        .unwrap();
        for policy in DiagonalMovement::ALL {
            let mut f = DepthFirstFinder::from(policy);
            f.find_path(0, 0, 4, 0, &g).unwrap();
            let rng = g.bounds();
            let mut closed = 0;
            for i in 0..rng.len() {
                let n = f.nodes.get(i);
                assert!(!n.closed || n.opened, "{} closed but never opened", rng.point_at(i));
                closed += usize::from(n.closed);
            }
            assert_eq!(closed, f.last_stats().expanded);
        }
    }

    struct Reversed<'a>(&'a WalkGrid);

    impl Walkable for Reversed<'_> {
        fn range(&self) -> Range {
            self.0.bounds()
        }

        fn is_walkable(&self, p: Point) -> bool {
            self.0.is_walkable(p)
        }

        fn neighbors(&self, p: Point, policy: DiagonalMovement, buf: &mut Vec<Point>) {
            Walkable::neighbors(self.0, p, policy, buf);
            buf.reverse();
        }
    }

    #[test]
    fn neighbor_order_selects_path() {
        let g = WalkGrid::new(3, 3);
        let mut f = DepthFirstFinder::default();
        assert_eq!(
            f.find_path(0, 0, 2, 2, &Reversed(&g)).unwrap(),
            pts(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)])
        );
    }

    #[test]
    fn reused_finder_matches_fresh_finder() {
        let big = WalkGrid::from_ascii(
            "
            ..#..
            .##..
            ...#.
            #....
            ",
        )
        .unwrap();
        let small = WalkGrid::new(2, 2);
        let policy = DiagonalMovement::IfAtMostOneObstacle;
        let mut reused = DepthFirstFinder::from(policy);
        let first = reused.find_path(0, 0, 4, 0, &big).unwrap();
        let tiny = reused.find_path(1, 1, 0, 0, &small).unwrap();
        let again = reused.find_path(0, 0, 4, 0, &big).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, again);
        assert_eq!(
            tiny,
            DepthFirstFinder::from(policy).find_path(1, 1, 0, 0, &small).unwrap()
        );
    }

    #[test]
    fn deep_corridor_does_not_overflow() {
        let g = serpentine(301, 301);
        let mut f = DepthFirstFinder::from(DiagonalMovement::Never);
        let path = f.find_path(0, 0, 300, 300, &g).unwrap();
        assert_eq!(path.len(), g.count_walkable());
        assert_eq!(path.len(), 151 * 301 + 150);
        assert_eq!(f.last_stats().max_depth, path.len() - 1);
        assert!(is_valid_path(&g, DiagonalMovement::Never, &path));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn any_policy() -> impl Strategy<Value = DiagonalMovement> {
            prop::sample::select(DiagonalMovement::ALL.to_vec())
        }

        fn scenario() -> impl Strategy<Value = (WalkGrid, Point, Point)> {
            (1..10i32, 1..10i32).prop_flat_map(|(w, h)| {
                (
                    prop::collection::vec(prop::bool::weighted(0.7), (w * h) as usize),
                    0..w,
                    0..h,
                    0..w,
                    0..h,
                )
                    .prop_map(move |(cells, sx, sy, gx, gy)| {
                        let mut g = WalkGrid::new(w, h);
                        let rng = g.bounds();
                        for (i, open) in cells.into_iter().enumerate() {
                            g.set_walkable(rng.point_at(i), open);
                        }
                        (g, Point::new(sx, sy), Point::new(gx, gy))
                    })
            })
        }

        proptest! {
            #[test]
            fn paths_are_valid_and_complete(
                (grid, from, to) in scenario(),
                policy in any_policy()
            ) {
                let mut f = DepthFirstFinder::from(policy);
                let path = f.find(from, to, &grid).unwrap();

                prop_assert_eq!(path.is_empty(), !bfs_reachable(&grid, policy, from, to));
                if let (Some(&first), Some(&last)) = (path.first(), path.last()) {
                    prop_assert_eq!(first, from);
                    prop_assert_eq!(last, to);
                }
                prop_assert!(is_valid_path(&grid, policy, &path));
                for i in 0..grid.bounds().len() {
                    let n = f.nodes.get(i);
                    prop_assert!(!n.closed || n.opened);
                }
                if policy == DiagonalMovement::Never {
                    prop_assert!(path.windows(2).all(|w| manhattan(w[0], w[1]) == 1));
                }
            }

            #[test]
            fn reuse_is_stateless(
                (grid, from, to) in scenario(),
                (other, ofrom, oto) in scenario(),
                policy in any_policy()
            ) {
                let mut reused = DepthFirstFinder::from(policy);
                reused.find(ofrom, oto, &other).unwrap();
                let a = reused.find(from, to, &grid).unwrap();
                let b = DepthFirstFinder::from(policy).find(from, to, &grid).unwrap();
                prop_assert_eq!(a, b);
            }
        }
    }
}
