//! Shared helpers for the command-line demos: random obstacle maps and a
//! plain-text picture of a search frame.

use gridstar_core::{ObstacleGrid, Point};
use gridstar_search::SearchFrame;
use rand::Rng;

pub const DEFAULT_SIZE: i32 = 20;
pub const MIN_SIZE: i32 = 5;
pub const MAX_SIZE: i32 = 50;

/// Glyphs used by [`render`]. Terrain and endpoints share the layout
/// characters, so a solved frame without overlays reads back as a layout.
pub mod glyph {
    pub use gridstar_core::layout::{FLOOR, GOAL, START, WALL};

    pub const PATH: char = '*';
    pub const OPEN: char = 'o';
    pub const CLOSED: char = 'x';
}

/// Block each cell with probability `density` (clamped to `0.0..=1.0`,
/// NaN counts as zero), leaving the cells in `keep` open.
///
/// Returns the number of blocked cells.
pub fn scatter_walls(
    grid: &mut ObstacleGrid,
    density: f64,
    keep: &[Point],
    rng: &mut impl Rng,
) -> usize {
    let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
    for p in grid.bounds() {
        let blocked = !keep.contains(&p) && rng.random_bool(density);
        grid.set_blocked(p, blocked);
    }
    grid.blocked_count()
}

/// Draw `frame` over `grid` as text, one line per row.
///
/// Path cells win over open cells, which win over closed cells; the
/// endpoints are always drawn on top.
pub fn render(grid: &ObstacleGrid, endpoints: Option<(Point, Point)>, frame: &SearchFrame) -> String {
    let w = grid.width() as usize;
    let mut cells: Vec<char> = grid
        .iter()
        .map(|(_, blocked)| if blocked { glyph::WALL } else { glyph::FLOOR })
        .collect();

    let mut paint = |p: Point, ch: char| {
        if grid.contains(p) {
            cells[p.y as usize * w + p.x as usize] = ch;
        }
    };
    for &p in &frame.closed {
        paint(p, glyph::CLOSED);
    }
    for &p in &frame.open {
        paint(p, glyph::OPEN);
    }
    for &p in &frame.path {
        paint(p, glyph::PATH);
    }
    if let Some((start, goal)) = endpoints {
        paint(start, glyph::START);
        paint(goal, glyph::GOAL);
    }

    let mut out = String::with_capacity(cells.len() + grid.height() as usize);
    for (i, row) in cells.chunks(w.max(1)).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.extend(row);
    }
    out
}
