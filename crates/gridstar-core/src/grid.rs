//! The obstacle map searched by the engine.
//!
//! [`ObstacleGrid`] is a `width × height` array of blocked/open flags with
//! the origin at `(0, 0)`.

use crate::geom::{Point, Range};

/// A rectangular grid of cells, each either open or blocked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleGrid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl ObstacleGrid {
    /// Create a grid with every cell open.
    ///
    /// Non-positive dimensions give an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            blocked: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the size as a Point (width = x, height = y).
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The grid rectangle `[(0, 0), (width, height))`.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Blocked flag at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<bool> {
        self.index(p).map(|i| self.blocked[i])
    }

    /// Whether `p` is blocked. Out-of-bounds points count as blocked.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.at(p).unwrap_or(true)
    }

    /// Set the blocked flag at `p`.
    ///
    /// Returns `false` (and changes nothing) if `p` is out of bounds.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) -> bool {
        match self.index(p) {
            Some(i) => {
                self.blocked[i] = blocked;
                true
            }
            None => false,
        }
    }

    /// Unblock every cell.
    pub fn clear(&mut self) {
        self.blocked.fill(false);
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Return a grid of the new size keeping the obstacles of the
    /// overlapping region. Newly exposed cells are open.
    pub fn resized(&self, width: i32, height: i32) -> Self {
        let mut next = Self::new(width, height);
        for p in self.bounds().intersect(next.bounds()) {
            if self.is_blocked(p) {
                next.set_blocked(p, true);
            }
        }
        next
    }

    /// Iterate over `(Point, blocked)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        self.bounds().iter().zip(self.blocked.iter().copied())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = ObstacleGrid::new(3, 2);
        g.set_blocked(Point::new(2, 1), true);
        let json = serde_json::to_string(&g).unwrap();
        let back: ObstacleGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
