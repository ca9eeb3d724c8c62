//! Shared pieces of the gridwalk demos: cave carving, endpoint parsing and
//! ASCII rendering of a found path.

use gridwalk_core::{Point, WalkGrid};
use gridwalk_paths::ORTHOGONAL;
use rand::RngExt;

/// Glyph for path cells between the endpoints.
pub const PATH: char = '*';
/// Glyph for the start cell.
pub const START: char = 'S';
/// Glyph for the goal cell.
pub const GOAL: char = 'G';

/// Carve a cave into a fully blocked `width` × `height` grid by random
/// walks from its center.
///
/// Walks continue until `fill_pct` (0.0–1.0) of the area is walkable or
/// `walks` walks have been made. Steps leaving the grid are skipped.
pub fn carve_cave(
    width: i32,
    height: i32,
    fill_pct: f64,
    walks: usize,
    rng: &mut impl RngExt,
) -> WalkGrid {
    let mut grid = WalkGrid::new(width, height);
    let bounds = grid.bounds();
    for p in bounds {
        grid.set_walkable(p, false);
    }
    let total = bounds.len();
    let target = (total as f64 * fill_pct.clamp(0.0, 1.0)) as usize;
    let start = cave_center(&grid);
    let mut carved = 0usize;

    for _ in 0..walks {
        let mut pos = start;
        for _ in 0..total * 4 {
            if carved >= target {
                return grid;
            }
            if !grid.is_walkable(pos) {
                grid.set_walkable(pos, true);
                carved += 1;
            }
            let next = pos + ORTHOGONAL[rng.random_range(0..ORTHOGONAL.len())];
            if bounds.contains(next) {
                pos = next;
            }
        }
    }
    grid
}

/// The cell every carving walk starts from.
pub fn cave_center(grid: &WalkGrid) -> Point {
    let b = grid.bounds();
    Point::new(b.min.x + b.width() / 2, b.min.y + b.height() / 2)
}

/// Pick a random walkable cell, or `None` if the grid has none.
pub fn random_open_cell(grid: &WalkGrid, rng: &mut impl RngExt) -> Option<Point> {
    let open: Vec<Point> = grid
        .bounds()
        .iter()
        .filter(|&p| grid.is_walkable(p))
        .collect();
    if open.is_empty() {
        return None;
    }
    Some(open[rng.random_range(0..open.len())])
}

/// Parse `"x,y"` into a point.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| format!("bad coordinate {v:?}: {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

/// Render `grid` with `path` drawn over it.
pub fn render(grid: &WalkGrid, path: &[Point]) -> String {
    let mut rows: Vec<Vec<char>> = grid
        .to_string()
        .lines()
        .map(|l| l.chars().collect())
        .collect();
    let last = path.len().saturating_sub(1);
    for (i, p) in path.iter().enumerate() {
        let glyph = match i {
            0 => START,
            _ if i == last => GOAL,
            _ => PATH,
        };
        if let Some(c) = rows
            .get_mut(p.y as usize)
            .and_then(|r| r.get_mut(p.x as usize))
        {
            *c = glyph;
        }
    }
    rows.into_iter()
        .map(|r| r.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
