//! A boolean walkability grid.
//!
//! [`WalkGrid`] stores one passable/blocked flag per cell in row-major
//! order, with its origin at (0, 0). It can be built blank, from a matrix
//! of integers (0 = walkable) or from an ASCII map (`.` walkable, `#`
//! blocked).

use std::fmt;

use thiserror::Error;

use crate::geom::{Point, Range};

/// Glyph used for blocked cells in ASCII maps.
pub const BLOCKED: char = '#';
/// Glyph used for walkable cells in ASCII maps.
pub const OPEN: char = '.';

/// Errors raised while building a [`WalkGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown map glyph {glyph:?} at {pos}")]
    UnknownGlyph { glyph: char, pos: Point },
}

/// A rectangular grid of walkable / blocked cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkGrid {
    cells: Vec<bool>,
    bounds: Range,
}

impl WalkGrid {
    /// Create a grid where every cell is walkable.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![true; bounds.len()],
            bounds,
        }
    }

    /// Build a grid from rows of integers. `0` marks a walkable cell, any
    /// other value a blocked one.
    pub fn from_matrix<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: r.len(),
                });
            }
            cells.extend(r.iter().map(|&v| v == 0));
        }
        Ok(Self {
            cells,
            bounds: Range::new(0, 0, width as i32, rows.len() as i32),
        })
    }

    /// Parse an ASCII map.
    ///
    /// Each line is trimmed and blank lines are skipped, so indented raw
    /// string literals work as input.
    pub fn from_ascii(map: &str) -> Result<Self, GridError> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0usize;
        for line in map.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let mut found = 0usize;
            for (x, glyph) in line.chars().enumerate() {
                let walkable = match glyph {
                    OPEN => true,
                    BLOCKED => false,
                    _ => {
                        return Err(GridError::UnknownGlyph {
                            glyph,
                            pos: Point::new(x as i32, height as i32),
                        });
                    }
                };
                cells.push(walkable);
                found += 1;
            }
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(GridError::RaggedRow {
                    row: height,
                    expected,
                    found,
                });
            }
            height += 1;
        }
        Ok(Self {
            cells,
            bounds: Range::new(0, 0, width.unwrap_or(0) as i32, height as i32),
        })
    }

    /// The rectangle covered by this grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Whether `p` is inside the grid and walkable.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.bounds.index_of(p).is_some_and(|i| self.cells[i])
    }

    /// Mark `p` walkable or blocked. No-op outside the grid.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) {
        if let Some(i) = self.bounds.index_of(p) {
            self.cells[i] = walkable;
        }
    }

    /// Number of walkable cells.
    pub fn count_walkable(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

impl fmt::Display for WalkGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width() {
                let c = if self.is_walkable(Point::new(x, y)) { OPEN } else { BLOCKED };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
