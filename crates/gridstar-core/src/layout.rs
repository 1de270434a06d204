//! Obstacle maps written as text.
//!
//! A [`Layout`] parses an ASCII picture into an [`ObstacleGrid`] plus the
//! optional start and goal markers:
//!
//! ```text
//! S..#....
//! .#.#.##.
//! .#...#.G
//! ```
//!
//! `#` is a blocked cell, `.` an open one, `S` the start and `G` the goal
//! (both open).

use crate::geom::Point;
use crate::grid::ObstacleGrid;

/// Character for a blocked cell.
pub const WALL: char = '#';
/// Character for an open cell.
pub const FLOOR: char = '.';
/// Character marking the start cell.
pub const START: char = 'S';
/// Character marking the goal cell.
pub const GOAL: char = 'G';

/// A parsed text map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub grid: ObstacleGrid,
    pub start: Option<Point>,
    pub goal: Option<Point>,
}

impl Layout {
    /// Parse a text map.
    ///
    /// Leading/trailing whitespace is trimmed from the whole string but not
    /// from individual lines (a trailing `'\r'` per line is ignored). Every
    /// line must have the same width.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LayoutError::Empty);
        }
        let lines: Vec<&str> = s.split('\n').map(|l| l.trim_end_matches('\r')).collect();
        let width = lines[0].chars().count();
        for (y, line) in lines.iter().enumerate() {
            let w = line.chars().count();
            if w != width {
                return Err(LayoutError::InconsistentSize {
                    line: y,
                    expected: width,
                    found: w,
                });
            }
        }

        let mut grid = ObstacleGrid::new(width as i32, lines.len() as i32);
        let mut start = None;
        let mut goal = None;
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match ch {
                    WALL => {
                        grid.set_blocked(p, true);
                    }
                    FLOOR => {}
                    START => place(&mut start, ch, p)?,
                    GOAL => place(&mut goal, ch, p)?,
                    _ => return Err(LayoutError::InvalidRune { ch, pos: p }),
                }
            }
        }
        Ok(Self { grid, start, goal })
    }

    /// Render the layout back to text.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.grid.len() + self.grid.height() as usize);
        for (p, blocked) in self.grid.iter() {
            if p.x == 0 && p.y > 0 {
                out.push('\n');
            }
            let ch = if Some(p) == self.start {
                START
            } else if Some(p) == self.goal {
                GOAL
            } else if blocked {
                WALL
            } else {
                FLOOR
            };
            out.push(ch);
        }
        out
    }
}

fn place(slot: &mut Option<Point>, ch: char, p: Point) -> Result<(), LayoutError> {
    if let Some(first) = *slot {
        return Err(LayoutError::DuplicateMarker {
            ch,
            first,
            second: p,
        });
    }
    *slot = Some(p);
    Ok(())
}

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The text contains no cells.
    #[error("layout is empty")]
    Empty,
    /// Lines have inconsistent widths.
    #[error("layout line {line} has width {found}, expected {expected}")]
    InconsistentSize {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `#`, `.`, `S` or `G` was found.
    #[error("layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}")]
    InvalidRune { ch: char, pos: Point },
    /// `S` or `G` appears more than once.
    #[error("layout marker \u{201c}{ch}\u{201d} appears at {first} and {second}")]
    DuplicateMarker { ch: char, first: Point, second: Point },
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAZE: &str = "\
S..#
.#.#
.#.G";

    #[test]
    fn parse_and_size() {
        let l = Layout::parse(MAZE).unwrap();
        assert_eq!(l.grid.size(), Point::new(4, 3));
        assert_eq!(l.start, Some(Point::new(0, 0)));
        assert_eq!(l.goal, Some(Point::new(3, 2)));
        assert_eq!(l.grid.blocked_count(), 4);
        assert!(l.grid.is_blocked(Point::new(3, 0)));
        assert!(!l.grid.is_blocked(Point::new(3, 2)));
    }

    #[test]
    fn markers_are_optional() {
        let l = Layout::parse("..\n#.").unwrap();
        assert_eq!(l.start, None);
        assert_eq!(l.goal, None);
    }

    #[test]
    fn carriage_returns_are_ignored() {
        let l = Layout::parse("S.\r\n.G\r\n").unwrap();
        assert_eq!(l.grid.size(), Point::new(2, 2));
        assert_eq!(l.goal, Some(Point::new(1, 1)));
    }

    #[test]
    fn to_text_round_trips() {
        let l = Layout::parse(MAZE).unwrap();
        assert_eq!(l.to_text(), MAZE);
    }

    #[test]
    fn inconsistent_size_error() {
        let err = Layout::parse("..\n...").unwrap_err();
        assert_eq!(
            err,
            LayoutError::InconsistentSize {
                line: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn invalid_rune_error() {
        let err = Layout::parse("..\n.x").unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidRune {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
    }

    #[test]
    fn duplicate_marker_error() {
        let err = Layout::parse("S.S").unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateMarker { ch: 'S', .. }));
    }

    #[test]
    fn empty_error() {
        assert_eq!(Layout::parse("  \n "), Err(LayoutError::Empty));
    }
}
