use gridstar_core::{ObstacleGrid, Point, Range};

/// Read-only view of the terrain a search runs over.
pub trait Passable {
    /// The rectangle of addressable cells.
    fn bounds(&self) -> Range;

    /// Whether a walker may stand on `p`. Must be `false` outside
    /// [`bounds`](Self::bounds).
    fn passable(&self, p: Point) -> bool;
}

impl Passable for ObstacleGrid {
    #[inline]
    fn bounds(&self) -> Range {
        ObstacleGrid::bounds(self)
    }

    #[inline]
    fn passable(&self, p: Point) -> bool {
        !self.is_blocked(p)
    }
}
