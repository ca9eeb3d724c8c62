//! **gridwalk-core** — geometry primitives and walkability grids.
//!
//! This crate provides the foundational types shared across the *gridwalk*
//! workspace: integer [`Point`]s, half-open [`Range`] rectangles and the
//! [`WalkGrid`] passability map consumed by the pathfinders in
//! `gridwalk-paths`.

pub mod geom;
pub mod grid;

pub use geom::{Point, Range, RangeIter};
pub use grid::{GridError, WalkGrid};
