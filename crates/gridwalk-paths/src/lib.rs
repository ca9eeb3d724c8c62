//! Depth-first pathfinding on walkability grids.
//!
//! [`DepthFirstFinder`] explores a grid depth-first from a start cell,
//! backtracking out of dead ends, and returns the first route it finds to
//! the goal. It makes no attempt at shortest paths: the route is decided
//! by the neighbor order of the grid (see [`policy_neighbors`]).
//!
//! Diagonal steps are governed by a [`DiagonalMovement`] policy, resolved
//! once from [`FinderOptions`] when the finder is built:
//!
//! | Options | Policy |
//! |---|---|
//! | `diagonal_movement: Some(p)` | `p` |
//! | `allow_diagonal: false` | [`DiagonalMovement::Never`] |
//! | `allow_diagonal: true, dont_cross_corners: true` | [`DiagonalMovement::OnlyWhenNoObstacles`] |
//! | `allow_diagonal: true, dont_cross_corners: false` | [`DiagonalMovement::IfAtMostOneObstacle`] |
//!
//! ```
//! use gridwalk_core::{Point, WalkGrid};
//! use gridwalk_paths::{DepthFirstFinder, DiagonalMovement};
//!
//! let grid = WalkGrid::from_ascii("...\n.#.\n...").unwrap();
//! let mut finder = DepthFirstFinder::from(DiagonalMovement::Never);
//! let path = finder.find_path(0, 0, 2, 2, &grid).unwrap();
//! assert_eq!(path.first(), Some(&Point::new(0, 0)));
//! assert_eq!(path.last(), Some(&Point::new(2, 2)));
//! ```

mod dfs;
mod diagonal;
mod error;
mod neighbors;
mod nodes;
mod path;
mod traits;

pub use dfs::{DepthFirstFinder, SearchStats};
pub use diagonal::{DiagonalMovement, FinderOptions};
pub use error::{FindError, ParsePolicyError};
pub use neighbors::{DIAGONAL, ORTHOGONAL, policy_neighbors};
pub use path::{chebyshev, is_legal_step, is_valid_path, manhattan, path_length};
pub use traits::Walkable;
